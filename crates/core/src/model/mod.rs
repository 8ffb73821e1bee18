mod ids;
mod judge;
mod problem;
mod session;

pub use ids::{ParseIdError, ProblemId, SessionId};

pub use judge::{JudgeReport, JudgeResult, Verdict};
pub use problem::{Platform, Problem, ProblemError, extract_problem_key};
pub use session::{
    LogDifficulty, LogResult, QuickLogDefaults, Session, SessionDataError, SessionPatch,
    SessionProgress, SessionStatus, UnderstandingAnswers, UnderstandingLevel,
};
