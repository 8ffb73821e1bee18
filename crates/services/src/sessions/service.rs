use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use practice_core::model::{
    JudgeResult, LogDifficulty, LogResult, Problem, Session, SessionId, SessionPatch,
    SessionStatus, UnderstandingLevel,
};
use storage::repository::{SessionRepository, StorageError};
use tokio::sync::Mutex;

use super::queries::{logged_sessions, today_reviews};
use crate::Clock;
use crate::error::SessionError;

/// Creates, updates and reads practice sessions.
///
/// Every mutation goes through `update_session`, so a patch is the only way a
/// session changes after creation. Patches are applied one at a time.
#[derive(Clone)]
pub struct SessionService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl SessionService {
    #[must_use]
    pub fn new(clock: Clock, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            clock,
            sessions,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a new session for `problem` and persist it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the session cannot be stored.
    pub async fn create_session(&self, problem: Problem) -> Result<Session, SessionError> {
        let session = Session::start(SessionId::generate(), problem, self.clock.now());
        self.sessions.insert_session(&session).await?;
        tracing::debug!(
            session_id = %session.id(),
            problem_id = %session.problem().id(),
            "session created"
        );
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn get_session(&self, id: SessionId) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.get_session(id).await?)
    }

    /// Merge `patch` into the stored session and return the result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if no session has this id.
    pub async fn update_session(
        &self,
        id: SessionId,
        patch: SessionPatch,
    ) -> Result<Session, SessionError> {
        // Held across read, merge and write so concurrent patches cannot revert each other.
        let _guard = self.write_lock.lock().await;
        let mut session = self
            .sessions
            .get_session(id)
            .await?
            .ok_or(SessionError::NotFound(id))?;
        session.apply(patch, self.clock.now());
        self.sessions
            .update_session(&session)
            .await
            .map_err(|err| match err {
                StorageError::NotFound => SessionError::NotFound(id),
                other => SessionError::Storage(other),
            })?;
        tracing::debug!(session_id = %id, status = session.status().as_str(), "session updated");
        Ok(session)
    }

    /// Store the quick-log answers and stamp `logged_at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if no session has this id.
    pub async fn record_quick_log(
        &self,
        id: SessionId,
        difficulty: LogDifficulty,
        result: LogResult,
    ) -> Result<Session, SessionError> {
        let patch = SessionPatch::new().with_log(difficulty, result, self.clock.now());
        self.update_session(id, patch).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if no session has this id.
    pub async fn attach_judge(
        &self,
        id: SessionId,
        judge: JudgeResult,
    ) -> Result<Session, SessionError> {
        self.update_session(id, SessionPatch::new().with_judge(judge))
            .await
    }

    /// Put the session on the review schedule for `at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if no session has this id.
    pub async fn schedule_review(
        &self,
        id: SessionId,
        at: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let patch = SessionPatch::new()
            .with_review_at(at)
            .with_status(SessionStatus::Scheduled);
        self.update_session(id, patch).await
    }

    /// Mark a review done with the understanding level reached.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if no session has this id.
    pub async fn complete_review(
        &self,
        id: SessionId,
        level: UnderstandingLevel,
    ) -> Result<Session, SessionError> {
        let patch = SessionPatch::new()
            .with_understanding_level(level)
            .with_status(SessionStatus::Completed);
        self.update_session(id, patch).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, SessionError> {
        Ok(self.sessions.list_sessions().await?)
    }

    /// Sessions due for review on `reference`'s calendar day.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn due_reviews<Tz: TimeZone>(
        &self,
        reference: &DateTime<Tz>,
    ) -> Result<Vec<Session>, SessionError> {
        let sessions = self.sessions.list_sessions().await?;
        Ok(today_reviews(&sessions, reference))
    }

    /// Logged sessions, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn logged(&self) -> Result<Vec<Session>, SessionError> {
        let sessions = self.sessions.list_sessions().await?;
        Ok(logged_sessions(&sessions))
    }
}
