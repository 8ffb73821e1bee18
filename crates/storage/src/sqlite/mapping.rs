use std::str::FromStr;

use chrono::{DateTime, Utc};
use practice_core::model::{
    JudgeResult, LogDifficulty, LogResult, Platform, Problem, ProblemId, Session, SessionId,
    SessionProgress, SessionStatus, UnderstandingAnswers, UnderstandingLevel, Verdict,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) const SESSION_COLUMNS: &str = r"
    id, problem_id, problem_title, problem_platform, problem_difficulty, problem_tags,
    problem_url, created_at, updated_at, code, understanding_answers, understanding_level,
    review_at, status, judge_verdict, judge_confidence, judge_reasons, judge_created_at,
    log_difficulty, log_result, logged_at
";

/// Column values for one session, in `SESSION_COLUMNS` order.
pub(crate) struct SessionRecord {
    pub id: String,
    pub problem_id: String,
    pub problem_title: String,
    pub problem_platform: &'static str,
    pub problem_difficulty: String,
    pub problem_tags: String,
    pub problem_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub code: Option<String>,
    pub understanding_answers: Option<String>,
    pub understanding_level: Option<&'static str>,
    pub review_at: Option<DateTime<Utc>>,
    pub status: &'static str,
    pub judge_verdict: Option<&'static str>,
    pub judge_confidence: Option<f64>,
    pub judge_reasons: Option<String>,
    pub judge_created_at: Option<DateTime<Utc>>,
    pub log_difficulty: Option<i64>,
    pub log_result: Option<&'static str>,
    pub logged_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub(crate) fn from_session(session: &Session) -> Result<Self, StorageError> {
        let problem = session.problem();
        let progress = session.progress();
        let judge = progress.judge.as_ref();

        Ok(Self {
            id: session.id().to_string(),
            problem_id: problem.id().as_str().to_owned(),
            problem_title: problem.title().to_owned(),
            problem_platform: problem.platform().as_str(),
            problem_difficulty: problem.difficulty().to_owned(),
            problem_tags: serde_json::to_string(problem.tags()).map_err(ser)?,
            problem_url: problem.url().map(str::to_owned),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
            code: progress.code.clone(),
            understanding_answers: progress
                .understanding_answers
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(ser)?,
            understanding_level: progress.understanding_level.map(UnderstandingLevel::as_str),
            review_at: progress.review_at,
            status: progress.status.as_str(),
            judge_verdict: judge.map(|j| j.verdict.as_str()),
            judge_confidence: judge.map(|j| j.confidence),
            judge_reasons: judge
                .map(|j| serde_json::to_string(&j.reasons))
                .transpose()
                .map_err(ser)?,
            judge_created_at: judge.map(|j| j.created_at),
            log_difficulty: progress.log_difficulty.map(|d| i64::from(d.value())),
            log_result: progress.log_result.map(LogResult::as_str),
            logged_at: progress.logged_at,
        })
    }
}

fn parse_platform(s: &str) -> Result<Platform, StorageError> {
    Platform::parse(s).ok_or_else(|| StorageError::Serialization(format!("invalid platform: {s}")))
}

fn parse_verdict(s: &str) -> Result<Verdict, StorageError> {
    Verdict::parse(s).ok_or_else(|| StorageError::Serialization(format!("invalid verdict: {s}")))
}

fn parse_log_difficulty(v: i64) -> Result<LogDifficulty, StorageError> {
    let raw = u8::try_from(v)
        .map_err(|_| StorageError::Serialization(format!("invalid log_difficulty: {v}")))?;
    LogDifficulty::new(raw).map_err(ser)
}

fn map_judge(row: &SqliteRow) -> Result<Option<JudgeResult>, StorageError> {
    let Some(verdict) = row.try_get::<Option<String>, _>("judge_verdict").map_err(ser)? else {
        return Ok(None);
    };
    let reasons: Vec<String> = match row
        .try_get::<Option<String>, _>("judge_reasons")
        .map_err(ser)?
    {
        Some(json) => serde_json::from_str(&json).map_err(ser)?,
        None => Vec::new(),
    };
    let created_at: DateTime<Utc> = row
        .try_get::<Option<DateTime<Utc>>, _>("judge_created_at")
        .map_err(ser)?
        .ok_or_else(|| StorageError::Serialization("missing judge_created_at".into()))?;

    Ok(Some(JudgeResult::new(
        parse_verdict(&verdict)?,
        row.try_get::<Option<f64>, _>("judge_confidence")
            .map_err(ser)?
            .unwrap_or_default(),
        reasons,
        created_at,
    )))
}

fn map_problem(row: &SqliteRow) -> Result<Problem, StorageError> {
    let tags_json: String = row.try_get("problem_tags").map_err(ser)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).map_err(ser)?;
    let platform: String = row.try_get("problem_platform").map_err(ser)?;

    Problem::new(
        ProblemId::new(row.try_get::<String, _>("problem_id").map_err(ser)?),
        row.try_get::<String, _>("problem_title").map_err(ser)?,
        parse_platform(&platform)?,
        row.try_get::<String, _>("problem_difficulty").map_err(ser)?,
        tags,
        row.try_get::<Option<String>, _>("problem_url").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_session_row(row: &SqliteRow) -> Result<Session, StorageError> {
    let id_str: String = row.try_get("id").map_err(ser)?;
    let id = SessionId::from_str(&id_str).map_err(ser)?;

    let understanding_answers: Option<UnderstandingAnswers> = row
        .try_get::<Option<String>, _>("understanding_answers")
        .map_err(ser)?
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(ser)?;

    let status: String = row.try_get("status").map_err(ser)?;

    let progress = SessionProgress {
        code: row.try_get("code").map_err(ser)?,
        understanding_answers,
        understanding_level: row
            .try_get::<Option<String>, _>("understanding_level")
            .map_err(ser)?
            .map(|s| UnderstandingLevel::parse(&s))
            .transpose()
            .map_err(ser)?,
        review_at: row.try_get("review_at").map_err(ser)?,
        status: SessionStatus::parse(&status).map_err(ser)?,
        judge: map_judge(row)?,
        log_difficulty: row
            .try_get::<Option<i64>, _>("log_difficulty")
            .map_err(ser)?
            .map(parse_log_difficulty)
            .transpose()?,
        log_result: row
            .try_get::<Option<String>, _>("log_result")
            .map_err(ser)?
            .map(|s| LogResult::parse(&s))
            .transpose()
            .map_err(ser)?,
        logged_at: row.try_get("logged_at").map_err(ser)?,
    };

    Session::from_persisted(
        id,
        map_problem(row)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
        progress,
    )
    .map_err(ser)
}
