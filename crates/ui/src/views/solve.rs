use std::str::FromStr;

use chrono::Duration;
use dioxus::prelude::*;
use dioxus_router::Link;
use practice_core::model::{LogDifficulty, LogResult, Session, SessionId, SessionPatch};
use practice_core::time::start_of_local_day;
use services::{SessionService, SubmissionRequest};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::quick_log::QuickLogForm;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{JudgeVm, ProblemVm, format_datetime};

#[component]
pub fn SolveView(session_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();

    let resource = use_resource(move || {
        let sessions = sessions.clone();
        let session_id = session_id.clone();
        async move {
            let id = SessionId::from_str(&session_id).map_err(|_| ViewError::NotFound)?;
            sessions
                .get_session(id)
                .await
                .map_err(|_| ViewError::Unknown)?
                .ok_or(ViewError::NotFound)
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(session) => rsx! {
                    SolveWorkspace { key: "{session.id()}", session: session.clone() }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { class: "btn", to: Route::Start {}, "Back to problems" }
                },
            }
        }
    }
}

#[component]
fn SolveWorkspace(session: Session) -> Element {
    let ctx = use_context::<AppContext>();
    let id = session.id();
    let mut current = use_signal(|| session.clone());
    let mut code = use_signal(|| session.progress().code.clone().unwrap_or_default());
    let mut hint_used = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let mut feedback = use_signal(|| None::<String>);
    let mut show_quick_log = use_signal(|| false);

    let on_save_code = {
        let sessions = ctx.sessions();
        move |_| {
            let sessions = sessions.clone();
            spawn(async move {
                match sessions
                    .update_session(id, SessionPatch::new().with_code(code()))
                    .await
                {
                    Ok(saved) => {
                        current.set(saved);
                        feedback.set(Some("Code saved.".into()));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, session_id = %id, "saving code failed");
                        feedback.set(Some(ViewError::Unknown.message().into()));
                    }
                }
            });
        }
    };

    let on_submit = {
        let sessions = ctx.sessions();
        let relay = ctx.relay();
        move |_| {
            if submitting() {
                return;
            }
            let sessions = sessions.clone();
            let relay = relay.clone();
            let snapshot = current();
            let elapsed = sessions.clock().now() - snapshot.created_at();
            let request = SubmissionRequest {
                code: code(),
                problem_id: Some(snapshot.problem().id().to_string()),
                time_spent_min: u32::try_from(elapsed.num_minutes()).ok().filter(|m| *m > 0),
                hint_used: hint_used(),
                self_report_difficulty: snapshot.progress().log_difficulty.map(LogDifficulty::value),
                ..SubmissionRequest::default()
            };
            submitting.set(true);
            feedback.set(None);
            spawn(async move {
                if let Some(saved) = save_code(&sessions, id, &request.code).await {
                    current.set(saved);
                }

                let reply = relay.submit(&request).await;
                match reply.judge_report() {
                    Some(report) => {
                        let judge = report.into_result(sessions.clock().now());
                        match sessions.attach_judge(id, judge).await {
                            Ok(judged) => {
                                current.set(judged);
                                show_quick_log.set(true);
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, session_id = %id, "storing verdict failed");
                                feedback.set(Some(ViewError::Unknown.message().into()));
                            }
                        }
                    }
                    None => {
                        let message = reply
                            .error_message()
                            .unwrap_or("The judge sent an unexpected response.");
                        feedback.set(Some(format!("Submission failed ({}): {message}", reply.status)));
                    }
                }
                submitting.set(false);
            });
        }
    };

    let on_log = {
        let sessions = ctx.sessions();
        move |(difficulty, result): (LogDifficulty, LogResult)| {
            let sessions = sessions.clone();
            spawn(async move {
                match sessions.record_quick_log(id, difficulty, result).await {
                    Ok(logged) => {
                        current.set(logged);
                        show_quick_log.set(false);
                        feedback.set(Some("Logged.".into()));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, session_id = %id, "quick log failed");
                        feedback.set(Some(ViewError::Unknown.message().into()));
                    }
                }
            });
        }
    };

    let on_schedule = {
        let sessions = ctx.sessions();
        let ctx = ctx.clone();
        move |_| {
            let sessions = sessions.clone();
            let now = ctx.now_local();
            let review_at = start_of_local_day(&(now + Duration::days(1)));
            spawn(async move {
                match sessions.schedule_review(id, review_at).await {
                    Ok(scheduled) => {
                        current.set(scheduled);
                        feedback.set(Some(format!(
                            "Review scheduled for {}.",
                            format_datetime(review_at, &now.timezone())
                        )));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, session_id = %id, "scheduling review failed");
                        feedback.set(Some(ViewError::Unknown.message().into()));
                    }
                }
            });
        }
    };

    let snapshot = current();
    let problem = ProblemVm::from(snapshot.problem());
    let judge = snapshot.judge().map(JudgeVm::from);
    let defaults = snapshot.quick_log_defaults();
    let code_is_blank = code().trim().is_empty();

    rsx! {
        header { class: "solve-head",
            h2 { "{problem.title}" }
            div { class: "meta",
                span { class: "{problem.platform_class}", "{problem.platform}" }
                span { class: "dot", "•" }
                span { class: "{problem.difficulty_class}", "{problem.difficulty}" }
                for tag in problem.tags.iter() {
                    span { class: "badge", "{tag}" }
                }
            }
            if let Some(url) = problem.url.as_deref() {
                a { class: "problem-url", href: "{url}", target: "_blank", "{url}" }
            }
        }

        section { class: "card editor",
            textarea {
                class: "code",
                spellcheck: "false",
                placeholder: "Write your Python solution here",
                value: "{code}",
                oninput: move |evt| code.set(evt.value()),
            }
            label { class: "hint",
                input {
                    r#type: "checkbox",
                    checked: hint_used(),
                    onchange: move |evt| hint_used.set(evt.checked()),
                }
                "I used a hint"
            }
            div { class: "actions",
                button { class: "btn", onclick: on_save_code, "Save" }
                button {
                    class: "btn primary",
                    disabled: submitting() || code_is_blank,
                    onclick: on_submit,
                    if submitting() { "Judging..." } else { "Submit" }
                }
            }
            if let Some(message) = feedback() {
                p { class: "feedback", "{message}" }
            }
        }

        if let Some(judge) = judge {
            section { class: "card verdict",
                h3 { class: "{judge.verdict_class}", "{judge.verdict_label}" }
                p { class: "muted", "Confidence: {judge.confidence_str}" }
                ul {
                    for reason in judge.reasons.iter() {
                        li { "{reason}" }
                    }
                }
            }
        }

        if show_quick_log() {
            QuickLogForm {
                defaults,
                on_save: on_log,
                on_close: move |_| show_quick_log.set(false),
            }
        } else {
            div { class: "actions",
                button { class: "btn", onclick: move |_| show_quick_log.set(true), "Quick log" }
                button { class: "btn", onclick: on_schedule, "Review tomorrow" }
                Link { class: "btn", to: Route::Log {}, "Open log" }
            }
        }
    }
}

/// Persist the editor contents ahead of a submission. A failed save is logged
/// and the submission goes ahead with the in-memory code.
async fn save_code(sessions: &SessionService, id: SessionId, code: &str) -> Option<Session> {
    match sessions
        .update_session(id, SessionPatch::new().with_code(code))
        .await
    {
        Ok(saved) => Some(saved),
        Err(err) => {
            tracing::warn!(error = %err, session_id = %id, "saving code before submit failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_harness::test_services;
    use practice_core::model::ProblemId;

    #[tokio::test(flavor = "current_thread")]
    async fn save_code_stores_editor_contents() {
        let services = test_services();
        let sessions = services.sessions();
        let problem = services
            .catalog()
            .get(&ProblemId::new("dummy-1"))
            .cloned()
            .expect("builtin problem");
        let session = sessions.create_session(problem).await.unwrap();

        let saved = save_code(&sessions, session.id(), "print(2)").await.unwrap();
        assert_eq!(saved.progress().code.as_deref(), Some("print(2)"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn save_code_reports_missing_session_as_none() {
        let services = test_services();
        let saved = save_code(&services.sessions(), SessionId::generate(), "print(2)").await;
        assert!(saved.is_none());
    }
}
