use std::collections::BTreeMap;

use chrono::Duration;
use practice_core::model::{
    JudgeResult, LogDifficulty, LogResult, Platform, Problem, ProblemId, Session, SessionId,
    SessionPatch, SessionStatus, UnderstandingLevel, Verdict,
};
use practice_core::time::fixed_now;
use storage::repository::{SessionRepository, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn build_session() -> Session {
    let problem = Problem::new(
        ProblemId::new("dummy-1"),
        "Two Sum",
        Platform::LeetCode,
        "Easy",
        vec!["Array".into(), "Hash Table".into()],
        Some("https://leetcode.com/problems/two-sum/".into()),
    )
    .unwrap();
    Session::start(SessionId::generate(), problem, fixed_now())
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_every_progress_field() {
    let repo = connect("memdb_roundtrip").await;
    let mut session = build_session();
    repo.insert_session(&session).await.unwrap();

    let now = fixed_now();
    let answers = BTreeMap::from([
        ("q1".to_string(), "hash map of complements".to_string()),
        ("q2".to_string(), "O(n)".to_string()),
    ]);
    session.apply(
        SessionPatch::new()
            .with_code("def solve():\n    pass")
            .with_understanding(answers.clone(), UnderstandingLevel::Partial)
            .with_review_at(now + Duration::days(1))
            .with_status(SessionStatus::Scheduled)
            .with_judge(JudgeResult::new(
                Verdict::LikelyPass,
                0.8,
                vec!["edge cases handled".into()],
                now,
            ))
            .with_log(LogDifficulty::new(2).unwrap(), LogResult::Success, now),
        now + Duration::minutes(10),
    );
    repo.update_session(&session).await.unwrap();

    let fetched = repo.get_session(session.id()).await.unwrap().expect("stored");
    assert_eq!(fetched, session);
    assert_eq!(fetched.problem().tags(), ["Array", "Hash Table"]);
    assert_eq!(fetched.progress().understanding_answers.as_ref(), Some(&answers));
    assert_eq!(fetched.judge().map(|j| j.verdict), Some(Verdict::LikelyPass));
}

#[tokio::test]
async fn sqlite_rejects_duplicates_and_unknown_updates() {
    let repo = connect("memdb_conflicts").await;
    let session = build_session();
    repo.insert_session(&session).await.unwrap();

    let err = repo.insert_session(&session).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));

    let stranger = build_session();
    let err = repo.update_session(&stranger).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
    assert!(repo.get_session(stranger.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_lists_sessions_oldest_first() {
    let repo = connect("memdb_listing").await;
    let older = build_session();
    let problem = older.problem().clone();
    let newer = Session::start(
        SessionId::generate(),
        problem,
        fixed_now() + Duration::hours(1),
    );
    repo.insert_session(&newer).await.unwrap();
    repo.insert_session(&older).await.unwrap();

    let listed = repo.list_sessions().await.unwrap();
    let ids: Vec<_> = listed.iter().map(Session::id).collect();
    assert_eq!(ids, vec![older.id(), newer.id()]);
}

#[tokio::test]
async fn storage_sqlite_runs_migrations_idempotently() {
    let url = "sqlite:file:memdb_storage?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("first open");
    let session = build_session();
    storage.sessions.insert_session(&session).await.unwrap();

    let reopened = Storage::sqlite(url).await.expect("second open");
    let fetched = reopened.sessions.get_session(session.id()).await.unwrap();
    assert_eq!(fetched.map(|s| s.id()), Some(session.id()));
}
