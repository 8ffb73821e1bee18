use chrono::{Duration, Local};
use practice_core::model::{
    JudgeResult, LogDifficulty, LogResult, ProblemId, SessionId, SessionPatch, UnderstandingLevel,
    Verdict,
};
use practice_core::time::fixed_now;

use super::test_harness::{ViewKind, setup_view_harness, test_services};

fn local_now() -> chrono::DateTime<Local> {
    fixed_now().with_timezone(&Local)
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_counts() {
    let services = test_services();
    services
        .sessions()
        .create_sample_review(&local_now())
        .await
        .expect("sample review");

    let mut harness = setup_view_harness(ViewKind::Home, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Reviews due today: 1"), "missing due count in {html}");
    assert!(html.contains("Logged sessions: 0"), "missing log count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_view_smoke_lists_catalog() {
    let mut harness = setup_view_harness(ViewKind::Start, test_services());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Two Sum"), "missing catalog entry in {html}");
    assert!(html.contains("Valid Anagram"), "missing catalog entry in {html}");
    assert!(html.contains("Problem URL or number"), "missing search box in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn solve_view_smoke_renders_problem_and_verdict() {
    let services = test_services();
    let sessions = services.sessions();
    let problem = services
        .catalog()
        .get(&ProblemId::new("dummy-3"))
        .cloned()
        .expect("builtin problem");
    let session = sessions.create_session(problem).await.unwrap();
    sessions
        .update_session(
            session.id(),
            SessionPatch::new()
                .with_code("def is_valid(s): ...")
                .with_judge(JudgeResult::new(
                    Verdict::LikelyPass,
                    0.75,
                    vec!["stack handles nesting".into()],
                    fixed_now(),
                )),
        )
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Solve(session.id()), services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Valid Parentheses"), "missing title in {html}");
    assert!(html.contains("Likely passing"), "missing verdict in {html}");
    assert!(html.contains("stack handles nesting"), "missing reason in {html}");
    assert!(html.contains("Submit"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn solve_view_smoke_unknown_session() {
    let services = test_services();
    let missing = SessionId::generate();
    let mut harness = setup_view_harness(ViewKind::Solve(missing), services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("That session does not exist."), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn log_view_smoke_renders_entry() {
    let services = test_services();
    let sessions = services.sessions();
    let problem = services
        .catalog()
        .get(&ProblemId::new("dummy-1"))
        .cloned()
        .expect("builtin problem");
    let session = sessions.create_session(problem).await.unwrap();
    sessions
        .record_quick_log(session.id(), LogDifficulty::new(5).unwrap(), LogResult::Success)
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Log, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Two Sum"), "missing title in {html}");
    assert!(html.contains("very hard (5/5)"), "missing difficulty in {html}");
    assert!(html.contains("Result: Success"), "missing result in {html}");
    assert!(html.contains("Today"), "missing relative date in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn log_view_smoke_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Log, test_services());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No logged sessions yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_smoke_lists_due_sessions() {
    let services = test_services();
    let sessions = services.sessions();
    let sample = sessions
        .create_sample_review(&local_now())
        .await
        .expect("sample review");
    let later = sessions
        .create_session(sample.problem().clone())
        .await
        .unwrap();
    sessions
        .schedule_review(later.id(), fixed_now() + Duration::days(3))
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Review, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1 to review"), "missing count in {html}");
    assert!(html.contains("Partial"), "missing understanding level in {html}");
    assert!(html.contains("Mark reviewed:"), "missing actions in {html}");
    assert!(html.contains("Full"), "missing level button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_dev_view_smoke_shows_count_and_button() {
    let services = test_services();
    services
        .sessions()
        .complete_review(
            services
                .sessions()
                .create_sample_review(&local_now())
                .await
                .unwrap()
                .id(),
            UnderstandingLevel::Full,
        )
        .await
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::ReviewDev, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Reviews due today: 0"), "missing count in {html}");
    assert!(html.contains("Create sample review"), "missing button in {html}");
}
