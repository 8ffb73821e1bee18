use chrono::{DateTime, TimeZone};
use practice_core::model::{LogResult, Session};

use crate::vm::judge_vm::{result_label, verdict_class, verdict_label};
use crate::vm::problem_vm::ProblemVm;
use crate::vm::time_fmt::format_relative_day;

/// One row of the practice log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntryVm {
    pub session_id: String,
    pub problem: ProblemVm,
    pub logged_str: String,
    /// e.g. `hard (4/5)`.
    pub difficulty_str: Option<String>,
    pub result_str: Option<&'static str>,
    pub result_class: &'static str,
    pub verdict_str: Option<&'static str>,
    pub verdict_class: &'static str,
}

impl LogEntryVm {
    #[must_use]
    pub fn from_session<Tz: TimeZone>(session: &Session, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let progress = session.progress();
        let judge = session.judge();
        Self {
            session_id: session.id().to_string(),
            problem: ProblemVm::from(session.problem()),
            logged_str: session
                .logged_at()
                .map(|at| format_relative_day(at, now))
                .unwrap_or_default(),
            difficulty_str: progress
                .log_difficulty
                .map(|d| format!("{} ({}/5)", d.label(), d.value())),
            result_str: progress.log_result.map(result_label),
            result_class: match progress.log_result {
                Some(LogResult::Success) => "result-success",
                Some(LogResult::Failure) => "result-failure",
                None => "",
            },
            verdict_str: judge.map(|j| verdict_label(j.verdict)),
            verdict_class: judge.map_or("", |j| verdict_class(j.verdict)),
        }
    }
}

#[must_use]
pub fn map_log_entries<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> Vec<LogEntryVm>
where
    Tz::Offset: std::fmt::Display,
{
    sessions
        .iter()
        .map(|session| LogEntryVm::from_session(session, now))
        .collect()
}
