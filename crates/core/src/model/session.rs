use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{JudgeResult, Problem, SessionId, Verdict};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionDataError {
    #[error("updated_at is before created_at")]
    InvalidTimeRange,

    #[error("log difficulty must be between 1 and 5, got {0}")]
    DifficultyOutOfRange(u8),

    #[error("unknown session field value: {0}")]
    UnknownValue(String),
}

//
// ─── ENUMS ────────────────────────────────────────────────────────────────────
//

/// Where a session sits in its review lifecycle.
///
/// Set directly by callers; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    InProgress,
    /// Waiting for a spaced-repetition review at `review_at`.
    Scheduled,
    Completed,
}

impl SessionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
        }
    }

    /// # Errors
    ///
    /// Returns `SessionDataError::UnknownValue` for unrecognised names.
    pub fn parse(value: &str) -> Result<Self, SessionDataError> {
        match value {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "SCHEDULED" => Ok(Self::Scheduled),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(SessionDataError::UnknownValue(other.to_string())),
        }
    }
}

/// Self-assessed grasp of a solution after answering the understanding questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnderstandingLevel {
    Weak,
    Partial,
    Full,
}

impl UnderstandingLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "WEAK",
            Self::Partial => "PARTIAL",
            Self::Full => "FULL",
        }
    }

    /// # Errors
    ///
    /// Returns `SessionDataError::UnknownValue` for unrecognised names.
    pub fn parse(value: &str) -> Result<Self, SessionDataError> {
        match value {
            "WEAK" => Ok(Self::Weak),
            "PARTIAL" => Ok(Self::Partial),
            "FULL" => Ok(Self::Full),
            other => Err(SessionDataError::UnknownValue(other.to_string())),
        }
    }
}

/// The user's own call on whether the attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogResult {
    Success,
    Failure,
}

impl LogResult {
    #[must_use]
    pub fn from_verdict(verdict: Verdict) -> Self {
        if verdict.is_passing() {
            Self::Success
        } else {
            Self::Failure
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// # Errors
    ///
    /// Returns `SessionDataError::UnknownValue` for unrecognised names.
    pub fn parse(value: &str) -> Result<Self, SessionDataError> {
        match value {
            "success" => Ok(Self::Success),
            "failure" => Ok(Self::Failure),
            other => Err(SessionDataError::UnknownValue(other.to_string())),
        }
    }
}

//
// ─── LOG DIFFICULTY ───────────────────────────────────────────────────────────
//

const LOG_DIFFICULTY_LABELS: [&str; 5] = ["very easy", "easy", "normal", "hard", "very hard"];

/// Felt difficulty on a 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogDifficulty(u8);

impl LogDifficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `SessionDataError::DifficultyOutOfRange` outside 1..=5.
    pub fn new(value: u8) -> Result<Self, SessionDataError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SessionDataError::DifficultyOutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        LOG_DIFFICULTY_LABELS[usize::from(self.0 - Self::MIN)]
    }
}

impl Default for LogDifficulty {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for LogDifficulty {
    type Error = SessionDataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogDifficulty> for u8 {
    fn from(value: LogDifficulty) -> Self {
        value.0
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Answers to the post-solve understanding questions, keyed by question id.
pub type UnderstandingAnswers = BTreeMap<String, String>;

/// Fields a session accumulates over its life.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionProgress {
    pub code: Option<String>,
    pub understanding_answers: Option<UnderstandingAnswers>,
    pub understanding_level: Option<UnderstandingLevel>,
    pub review_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub judge: Option<JudgeResult>,
    pub log_difficulty: Option<LogDifficulty>,
    pub log_result: Option<LogResult>,
    pub logged_at: Option<DateTime<Utc>>,
}

/// Partial update for a session. Only the fields that are `Some` are written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionPatch {
    pub code: Option<String>,
    pub understanding_answers: Option<UnderstandingAnswers>,
    pub understanding_level: Option<UnderstandingLevel>,
    pub review_at: Option<DateTime<Utc>>,
    pub status: Option<SessionStatus>,
    pub judge: Option<JudgeResult>,
    pub log_difficulty: Option<LogDifficulty>,
    pub log_result: Option<LogResult>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl SessionPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_understanding(
        mut self,
        answers: UnderstandingAnswers,
        level: UnderstandingLevel,
    ) -> Self {
        self.understanding_answers = Some(answers);
        self.understanding_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_understanding_level(mut self, level: UnderstandingLevel) -> Self {
        self.understanding_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_review_at(mut self, at: DateTime<Utc>) -> Self {
        self.review_at = Some(at);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_judge(mut self, judge: JudgeResult) -> Self {
        self.judge = Some(judge);
        self
    }

    #[must_use]
    pub fn with_log(
        mut self,
        difficulty: LogDifficulty,
        result: LogResult,
        logged_at: DateTime<Utc>,
    ) -> Self {
        self.log_difficulty = Some(difficulty);
        self.log_result = Some(result);
        self.logged_at = Some(logged_at);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Prefilled values for the quick-log form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickLogDefaults {
    pub difficulty: LogDifficulty,
    pub result: LogResult,
}

/// One attempt at one problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    problem: Problem,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    progress: SessionProgress,
}

impl Session {
    /// Start a fresh session with default progress.
    #[must_use]
    pub fn start(id: SessionId, problem: Problem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            problem,
            created_at: now,
            updated_at: now,
            progress: SessionProgress::default(),
        }
    }

    /// Rehydrate a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionDataError::InvalidTimeRange` if `updated_at` precedes `created_at`.
    pub fn from_persisted(
        id: SessionId,
        problem: Problem,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        progress: SessionProgress,
    ) -> Result<Self, SessionDataError> {
        if updated_at < created_at {
            return Err(SessionDataError::InvalidTimeRange);
        }
        Ok(Self {
            id,
            problem,
            created_at,
            updated_at,
            progress,
        })
    }

    /// Merge a patch into the session and bump `updated_at`.
    pub fn apply(&mut self, patch: SessionPatch, now: DateTime<Utc>) {
        let SessionPatch {
            code,
            understanding_answers,
            understanding_level,
            review_at,
            status,
            judge,
            log_difficulty,
            log_result,
            logged_at,
        } = patch;
        let progress = &mut self.progress;

        if code.is_some() {
            progress.code = code;
        }
        if understanding_answers.is_some() {
            progress.understanding_answers = understanding_answers;
        }
        if understanding_level.is_some() {
            progress.understanding_level = understanding_level;
        }
        if review_at.is_some() {
            progress.review_at = review_at;
        }
        if let Some(status) = status {
            progress.status = status;
        }
        if judge.is_some() {
            progress.judge = judge;
        }
        if log_difficulty.is_some() {
            progress.log_difficulty = log_difficulty;
        }
        if log_result.is_some() {
            progress.log_result = log_result;
        }
        if logged_at.is_some() {
            progress.logged_at = logged_at;
        }

        self.updated_at = now.max(self.created_at);
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn progress(&self) -> &SessionProgress {
        &self.progress
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.progress.status
    }

    #[must_use]
    pub fn review_at(&self) -> Option<DateTime<Utc>> {
        self.progress.review_at
    }

    #[must_use]
    pub fn logged_at(&self) -> Option<DateTime<Utc>> {
        self.progress.logged_at
    }

    #[must_use]
    pub fn judge(&self) -> Option<&JudgeResult> {
        self.progress.judge.as_ref()
    }

    #[must_use]
    pub fn is_logged(&self) -> bool {
        self.progress.logged_at.is_some()
    }

    /// True when the session is scheduled and `review_at` falls on the same
    /// calendar day as `reference`, read in `reference`'s time zone.
    #[must_use]
    pub fn is_due_on<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> bool {
        if self.progress.status != SessionStatus::Scheduled {
            return false;
        }
        self.progress.review_at.is_some_and(|at| {
            at.with_timezone(&reference.timezone()).date_naive() == reference.date_naive()
        })
    }

    /// Values to prefill the quick-log form with.
    ///
    /// A stored log wins; without one the judge verdict decides the result.
    #[must_use]
    pub fn quick_log_defaults(&self) -> QuickLogDefaults {
        let difficulty = self.progress.log_difficulty.unwrap_or_default();
        let result = self
            .progress
            .log_result
            .or_else(|| {
                self.progress
                    .judge
                    .as_ref()
                    .map(|judge| LogResult::from_verdict(judge.verdict))
            })
            .unwrap_or(LogResult::Success);
        QuickLogDefaults { difficulty, result }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
