use practice_core::model::{JudgeResult, LogResult, Verdict};

#[must_use]
pub fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "Passed",
        Verdict::LikelyPass => "Likely passing",
        Verdict::Fail => "Failed",
        Verdict::PossiblyFail => "Possibly failing",
        Verdict::TleRisk => "Time limit risk",
    }
}

#[must_use]
pub fn verdict_class(verdict: Verdict) -> &'static str {
    if verdict.is_passing() {
        "verdict-pass"
    } else {
        "verdict-fail"
    }
}

#[must_use]
pub fn result_label(result: LogResult) -> &'static str {
    match result {
        LogResult::Success => "Success",
        LogResult::Failure => "Failure",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JudgeVm {
    pub verdict_label: &'static str,
    pub verdict_class: &'static str,
    pub confidence_str: String,
    pub reasons: Vec<String>,
}

impl From<&JudgeResult> for JudgeVm {
    fn from(judge: &JudgeResult) -> Self {
        Self {
            verdict_label: verdict_label(judge.verdict),
            verdict_class: verdict_class(judge.verdict),
            confidence_str: format!("{:.2}", judge.confidence),
            reasons: judge.reasons.clone(),
        }
    }
}
