use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::ProblemId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("problem id cannot be empty")]
    EmptyId,

    #[error("problem title cannot be empty")]
    EmptyTitle,

    #[error("invalid problem url: {0}")]
    InvalidUrl(String),
}

//
// ─── PLATFORM ─────────────────────────────────────────────────────────────────
//

/// Judge site a problem comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "BOJ")]
    Boj,
    #[serde(rename = "LeetCode")]
    LeetCode,
    #[serde(rename = "Programmers")]
    Programmers,
    #[serde(rename = "custom")]
    Custom,
}

impl Platform {
    /// Guesses the platform from a URL or free-form input.
    ///
    /// Matching is a case-insensitive substring check; anything unrecognised
    /// is `Custom`.
    #[must_use]
    pub fn infer_from_url(input: &str) -> Self {
        let lower = input.to_lowercase();
        if lower.contains("leetcode") {
            Self::LeetCode
        } else if lower.contains("boj") || lower.contains("acmicpc") {
            Self::Boj
        } else if lower.contains("programmers") {
            Self::Programmers
        } else {
            Self::Custom
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boj => "BOJ",
            Self::LeetCode => "LeetCode",
            Self::Programmers => "Programmers",
            Self::Custom => "custom",
        }
    }

    /// Parses the serialized name back into a platform.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BOJ" => Some(Self::Boj),
            "LeetCode" => Some(Self::LeetCode),
            "Programmers" => Some(Self::Programmers),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── PROBLEM ──────────────────────────────────────────────────────────────────
//

/// A coding problem attached to a session.
///
/// Validated on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    id: ProblemId,
    title: String,
    platform: Platform,
    difficulty: String,
    tags: Vec<String>,
    url: Option<String>,
}

impl Problem {
    /// Build a validated problem.
    ///
    /// Blank tags are dropped and the remaining ones trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::EmptyId` / `ProblemError::EmptyTitle` for blank
    /// fields and `ProblemError::InvalidUrl` if the url does not parse.
    pub fn new(
        id: ProblemId,
        title: impl Into<String>,
        platform: Platform,
        difficulty: impl Into<String>,
        tags: Vec<String>,
        url: Option<String>,
    ) -> Result<Self, ProblemError> {
        if id.as_str().trim().is_empty() {
            return Err(ProblemError::EmptyId);
        }
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ProblemError::EmptyTitle);
        }
        if let Some(raw) = url.as_deref() {
            Url::parse(raw).map_err(|_| ProblemError::InvalidUrl(raw.to_string()))?;
        }
        let tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            id,
            title,
            platform,
            difficulty: difficulty.into(),
            tags,
            url,
        })
    }

    /// Register a problem straight from what the user typed.
    ///
    /// Used when a lookup finds nothing: the input becomes the title, the
    /// platform is inferred, and the input is kept as url only if it is one.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::EmptyTitle` if the input is blank.
    pub fn manual(input: &str, now: DateTime<Utc>) -> Result<Self, ProblemError> {
        let trimmed = input.trim();
        let url = Url::parse(trimmed).ok().map(|_| trimmed.to_string());
        let id = ProblemId::new(format!(
            "imported_{}_{}",
            now.timestamp_millis(),
            random_suffix()
        ));
        Self::new(
            id,
            trimmed,
            Platform::infer_from_url(trimmed),
            "Unknown",
            Vec::new(),
            url,
        )
    }

    #[must_use]
    pub fn id(&self) -> &ProblemId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..9)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}

/// Pull the lookup key out of a problem URL or id.
///
/// Prefers the first run of digits directly after a `/` (or the whole input
/// when it is numeric), then falls back to the last path segment, so
/// `.../problem/1920` yields `1920` and `.../problems/two-sum/` yields
/// `two-sum`.
#[must_use]
pub fn extract_problem_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Some(trimmed.to_string());
    }

    for segment in trimmed.split('/').skip(1) {
        let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            return Some(digits);
        }
    }

    let without_slash = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let (_, last) = without_slash.rsplit_once('/')?;
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn infers_platform_from_host() {
        assert_eq!(
            Platform::infer_from_url("https://LeetCode.com/problems/two-sum/"),
            Platform::LeetCode
        );
        assert_eq!(
            Platform::infer_from_url("https://www.acmicpc.net/problem/1920"),
            Platform::Boj
        );
        assert_eq!(
            Platform::infer_from_url("https://school.programmers.co.kr/learn/42576"),
            Platform::Programmers
        );
        assert_eq!(Platform::infer_from_url("1920"), Platform::Custom);
    }

    #[test]
    fn platform_names_round_trip() {
        for platform in [
            Platform::Boj,
            Platform::LeetCode,
            Platform::Programmers,
            Platform::Custom,
        ] {
            assert_eq!(Platform::parse(platform.as_str()), Some(platform));
        }
        assert_eq!(Platform::parse("Codeforces"), None);
    }

    #[test]
    fn extracts_numeric_and_slug_keys() {
        assert_eq!(
            extract_problem_key("https://www.acmicpc.net/problem/1920").as_deref(),
            Some("1920")
        );
        assert_eq!(extract_problem_key(" 2178 ").as_deref(), Some("2178"));
        assert_eq!(
            extract_problem_key("https://leetcode.com/problems/two-sum/").as_deref(),
            Some("two-sum")
        );
        assert_eq!(extract_problem_key("two-sum"), None);
        assert_eq!(extract_problem_key(""), None);
    }

    #[test]
    fn new_rejects_blank_title_and_bad_url() {
        let err = Problem::new(
            ProblemId::new("p1"),
            "   ",
            Platform::Custom,
            "Easy",
            Vec::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ProblemError::EmptyTitle);

        let err = Problem::new(
            ProblemId::new("p1"),
            "Two Sum",
            Platform::LeetCode,
            "Easy",
            Vec::new(),
            Some("not a url".into()),
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::InvalidUrl(_)));
    }

    #[test]
    fn new_trims_and_drops_blank_tags() {
        let problem = Problem::new(
            ProblemId::new("p1"),
            " Two Sum ",
            Platform::LeetCode,
            "Easy",
            vec![" Array ".into(), " ".into(), "Hash Table".into()],
            None,
        )
        .unwrap();
        assert_eq!(problem.title(), "Two Sum");
        assert_eq!(problem.tags(), ["Array", "Hash Table"]);
    }

    #[test]
    fn manual_problem_uses_input_as_title() {
        let now = fixed_now();
        let problem = Problem::manual(" https://www.acmicpc.net/problem/9999 ", now).unwrap();

        assert_eq!(problem.title(), "https://www.acmicpc.net/problem/9999");
        assert_eq!(problem.platform(), Platform::Boj);
        assert_eq!(problem.difficulty(), "Unknown");
        assert!(problem.tags().is_empty());
        assert_eq!(problem.url(), Some("https://www.acmicpc.net/problem/9999"));

        let prefix = format!("imported_{}_", now.timestamp_millis());
        assert!(problem.id().as_str().starts_with(&prefix));
        assert_eq!(problem.id().as_str().len(), prefix.len() + 9);
    }

    #[test]
    fn manual_problem_without_url() {
        let problem = Problem::manual("my own problem", fixed_now()).unwrap();
        assert_eq!(problem.url(), None);
        assert_eq!(problem.platform(), Platform::Custom);
        assert!(Problem::manual("  ", fixed_now()).is_err());
    }
}
