use chrono::{DateTime, TimeZone};
use practice_core::model::{Session, UnderstandingLevel};

use crate::vm::judge_vm::JudgeVm;
use crate::vm::problem_vm::ProblemVm;
use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewItemVm {
    pub session_id: String,
    pub problem: ProblemVm,
    pub review_at_str: String,
    pub level_str: Option<&'static str>,
    pub answers: Vec<(String, String)>,
    pub judge: Option<JudgeVm>,
}

#[must_use]
pub fn understanding_label(level: UnderstandingLevel) -> &'static str {
    match level {
        UnderstandingLevel::Weak => "Weak",
        UnderstandingLevel::Partial => "Partial",
        UnderstandingLevel::Full => "Full",
    }
}

impl ReviewItemVm {
    #[must_use]
    pub fn from_session<Tz: TimeZone>(session: &Session, zone: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let progress = session.progress();
        Self {
            session_id: session.id().to_string(),
            problem: ProblemVm::from(session.problem()),
            review_at_str: session
                .review_at()
                .map(|at| format_datetime(at, zone))
                .unwrap_or_default(),
            level_str: progress.understanding_level.map(understanding_label),
            answers: progress
                .understanding_answers
                .as_ref()
                .map(|answers| {
                    answers
                        .iter()
                        .map(|(key, answer)| (key.clone(), answer.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            judge: session.judge().map(JudgeVm::from),
        }
    }
}

#[must_use]
pub fn map_review_items<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> Vec<ReviewItemVm>
where
    Tz::Offset: std::fmt::Display,
{
    let zone = now.timezone();
    sessions
        .iter()
        .map(|session| ReviewItemVm::from_session(session, &zone))
        .collect()
}
