use async_trait::async_trait;
use practice_core::model::{Session, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for practice sessions, keyed by session id.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a brand-new session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a session with the same id exists.
    async fn insert_session(&self, session: &Session) -> Result<(), StorageError>;

    /// Fetch a session by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing id is `Ok(None)`.
    async fn get_session(&self, id: SessionId) -> Result<Option<Session>, StorageError>;

    /// Overwrite an existing session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the session was never inserted.
    async fn update_session(&self, session: &Session) -> Result<(), StorageError>;

    /// Every stored session, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn insert_session(&self, session: &Session) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&session.id()) {
            return Err(StorageError::Conflict);
        }
        guard.insert(session.id(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn update_session(&self, session: &Session) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.get_mut(&session.id()) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut sessions: Vec<Session> = guard.values().cloned().collect();
        sessions.sort_by_key(|s| (s.created_at(), s.id()));
        Ok(sessions)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemoryRepository::new());
        Self { sessions }
    }
}
