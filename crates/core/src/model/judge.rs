use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome reported by the external judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    LikelyPass,
    Fail,
    PossiblyFail,
    TleRisk,
}

impl Verdict {
    /// `PASS` and `LIKELY_PASS` count as a solved attempt.
    #[must_use]
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Pass | Self::LikelyPass)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::LikelyPass => "LIKELY_PASS",
            Self::Fail => "FAIL",
            Self::PossiblyFail => "POSSIBLY_FAIL",
            Self::TleRisk => "TLE_RISK",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PASS" => Some(Self::Pass),
            "LIKELY_PASS" => Some(Self::LikelyPass),
            "FAIL" => Some(Self::Fail),
            "POSSIBLY_FAIL" => Some(Self::PossiblyFail),
            "TLE_RISK" => Some(Self::TleRisk),
            _ => None,
        }
    }
}

/// Judge feedback attached to a session. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeResult {
    pub verdict: Verdict,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl JudgeResult {
    #[must_use]
    pub fn new(
        verdict: Verdict,
        confidence: f64,
        reasons: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            verdict,
            confidence,
            reasons,
            created_at,
        }
    }
}

/// Verdict payload as returned by the judging webhook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeReport {
    pub verdict: Verdict,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl JudgeReport {
    /// Stamp the report with the time it was received.
    #[must_use]
    pub fn into_result(self, received_at: DateTime<Utc>) -> JudgeResult {
        JudgeResult::new(self.verdict, self.confidence, self.reasons, received_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn passing_verdicts() {
        assert!(Verdict::Pass.is_passing());
        assert!(Verdict::LikelyPass.is_passing());
        assert!(!Verdict::Fail.is_passing());
        assert!(!Verdict::PossiblyFail.is_passing());
        assert!(!Verdict::TleRisk.is_passing());
    }

    #[test]
    fn report_parses_webhook_shape() {
        let report: JudgeReport = serde_json::from_str(
            r#"{"verdict":"TLE_RISK","confidence":0.4,"reasons":["nested loops"]}"#,
        )
        .unwrap();
        assert_eq!(report.verdict, Verdict::TleRisk);

        let result = report.into_result(fixed_now());
        assert_eq!(result.reasons, vec!["nested loops".to_string()]);
        assert_eq!(result.created_at, fixed_now());
    }

    #[test]
    fn report_defaults_missing_fields() {
        let report: JudgeReport = serde_json::from_str(r#"{"verdict":"PASS"}"#).unwrap();
        assert_eq!(report.confidence, 0.0);
        assert!(report.reasons.is_empty());
    }
}
