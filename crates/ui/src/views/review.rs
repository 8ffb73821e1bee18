use std::str::FromStr;

use dioxus::prelude::*;
use dioxus_router::Link;
use practice_core::model::{SessionId, UnderstandingLevel};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ReviewItemVm, map_review_items, understanding_label};

const LEVELS: [UnderstandingLevel; 3] = [
    UnderstandingLevel::Weak,
    UnderstandingLevel::Partial,
    UnderstandingLevel::Full,
];

/// Reviews due on the context's current local day, read at call time.
async fn due_review_items(ctx: &AppContext) -> Result<Vec<ReviewItemVm>, ViewError> {
    let now = ctx.now_local();
    let due = ctx
        .sessions()
        .due_reviews(&now)
        .await
        .map_err(|_| ViewError::Unknown)?;
    Ok(map_review_items(&due, &now))
}

#[component]
pub fn ReviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut error = use_signal(|| None::<ViewError>);

    let mut resource = use_resource({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            async move { due_review_items(&ctx).await }
        }
    });

    let state = view_state_from_resource(resource);
    let on_reviewed = use_callback(move |(session_id, level): (String, UnderstandingLevel)| {
        let sessions = ctx.sessions();
        spawn(async move {
            let Ok(id) = SessionId::from_str(&session_id) else {
                error.set(Some(ViewError::NotFound));
                return;
            };
            match sessions.complete_review(id, level).await {
                Ok(_) => {
                    error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    tracing::warn!(error = %err, session_id = %id, "marking review failed");
                    error.set(Some(ViewError::Unknown));
                }
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Today's reviews" }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { class: "empty", "Nothing to review today." }
                        Link { class: "btn", to: Route::ReviewDev {}, "Create a sample review" }
                    } else {
                        p { "{items.len()} to review" }
                        ul { class: "review-list",
                            for item in items {
                                ReviewCard {
                                    key: "{item.session_id}",
                                    item,
                                    on_reviewed: on_reviewed,
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ReviewCard(item: ReviewItemVm, on_reviewed: EventHandler<(String, UnderstandingLevel)>) -> Element {
    rsx! {
        li { class: "card",
            div { class: "review-head",
                h3 { "{item.problem.title}" }
                span { class: "{item.problem.platform_class}", "{item.problem.platform}" }
            }
            p { class: "muted", "Scheduled for {item.review_at_str}" }
            if let Some(level) = item.level_str {
                p { "Last understanding: {level}" }
            }
            if let Some(judge) = item.judge.as_ref() {
                p { class: "{judge.verdict_class}", "Verdict: {judge.verdict_label}" }
            }
            if !item.answers.is_empty() {
                dl { class: "answers",
                    for (key, answer) in item.answers.iter() {
                        dt { "{key}" }
                        dd { "{answer}" }
                    }
                }
            }
            div { class: "actions",
                span { "Mark reviewed:" }
                for level in LEVELS {
                    button {
                        class: "btn",
                        onclick: {
                            let session_id = item.session_id.clone();
                            move |_| on_reviewed.call((session_id.clone(), level))
                        },
                        "{understanding_label(level)}"
                    }
                }
            }
        }
    }
}
