use practice_core::model::{Session, SessionId};

use super::{
    SqliteRepository,
    mapping::{SESSION_COLUMNS, SessionRecord, map_session_row},
};
use crate::repository::{SessionRepository, StorageError};

#[async_trait::async_trait]
impl SessionRepository for SqliteRepository {
    async fn insert_session(&self, session: &Session) -> Result<(), StorageError> {
        let r = SessionRecord::from_session(session)?;
        let sql = format!(
            r"
            INSERT INTO sessions ({SESSION_COLUMNS})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                    ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
            ON CONFLICT(id) DO NOTHING
            "
        );
        let result = sqlx::query(&sql)
            .bind(r.id)
            .bind(r.problem_id)
            .bind(r.problem_title)
            .bind(r.problem_platform)
            .bind(r.problem_difficulty)
            .bind(r.problem_tags)
            .bind(r.problem_url)
            .bind(r.created_at)
            .bind(r.updated_at)
            .bind(r.code)
            .bind(r.understanding_answers)
            .bind(r.understanding_level)
            .bind(r.review_at)
            .bind(r.status)
            .bind(r.judge_verdict)
            .bind(r.judge_confidence)
            .bind(r.judge_reasons)
            .bind(r.judge_created_at)
            .bind(r.log_difficulty)
            .bind(r.log_result)
            .bind(r.logged_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(())
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>, StorageError> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_session_row).transpose()
    }

    async fn update_session(&self, session: &Session) -> Result<(), StorageError> {
        let r = SessionRecord::from_session(session)?;
        // created_at and the problem snapshot are fixed at insert time.
        let result = sqlx::query(
            r"
            UPDATE sessions SET
                updated_at = ?2,
                code = ?3,
                understanding_answers = ?4,
                understanding_level = ?5,
                review_at = ?6,
                status = ?7,
                judge_verdict = ?8,
                judge_confidence = ?9,
                judge_reasons = ?10,
                judge_created_at = ?11,
                log_difficulty = ?12,
                log_result = ?13,
                logged_at = ?14
            WHERE id = ?1
            ",
        )
        .bind(r.id)
        .bind(r.updated_at)
        .bind(r.code)
        .bind(r.understanding_answers)
        .bind(r.understanding_level)
        .bind(r.review_at)
        .bind(r.status)
        .bind(r.judge_verdict)
        .bind(r.judge_confidence)
        .bind(r.judge_reasons)
        .bind(r.judge_created_at)
        .bind(r.log_difficulty)
        .bind(r.log_result)
        .bind(r.logged_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StorageError> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY created_at ASC, id ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_session_row(&row)?);
        }
        Ok(out)
    }
}
