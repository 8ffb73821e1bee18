use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LogEntryVm, map_log_entries};

#[component]
pub fn LogView() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();
    let now = ctx.now_local();

    let resource = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            let logged = sessions.logged().await.map_err(|_| ViewError::Unknown)?;
            Ok(map_log_entries(&logged, &now))
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Practice log" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(entries) => rsx! {
                    if entries.is_empty() {
                        p { class: "empty", "No logged sessions yet." }
                        Link { class: "btn primary", to: Route::Start {}, "Start a problem" }
                    } else {
                        ul { class: "log-list",
                            for entry in entries {
                                LogEntryCard { key: "{entry.session_id}", entry }
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
fn LogEntryCard(entry: LogEntryVm) -> Element {
    rsx! {
        li { class: "card",
            Link { class: "log-link", to: Route::Solve { session_id: entry.session_id.clone() },
                div { class: "log-head",
                    h3 { "{entry.problem.title}" }
                    span { class: "log-date", "{entry.logged_str}" }
                }
                div { class: "meta",
                    span { class: "{entry.problem.platform_class}", "{entry.problem.platform}" }
                    span { class: "dot", "•" }
                    span { class: "{entry.problem.difficulty_class}", "{entry.problem.difficulty}" }
                    for tag in entry.problem.tags.iter() {
                        span { class: "badge", "{tag}" }
                    }
                }
                div { class: "log-fields",
                    if let Some(difficulty) = entry.difficulty_str.as_deref() {
                        span { "Felt difficulty: {difficulty}" }
                    }
                    if let Some(result) = entry.result_str {
                        span { class: "{entry.result_class}", "Result: {result}" }
                    }
                    if let Some(verdict) = entry.verdict_str {
                        span { class: "{entry.verdict_class}", "Verdict: {verdict}" }
                    }
                }
            }
        }
    }
}
