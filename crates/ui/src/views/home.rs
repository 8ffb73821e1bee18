use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HomeCounts {
    due_today: usize,
    logged: usize,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();
    let now = ctx.now_local();

    let resource = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            let due_today = sessions
                .due_reviews(&now)
                .await
                .map_err(|_| ViewError::Unknown)?
                .len();
            let logged = sessions.logged().await.map_err(|_| ViewError::Unknown)?.len();
            Ok(HomeCounts { due_today, logged })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Home" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(counts) => rsx! {
                    p { "Reviews due today: {counts.due_today}" }
                    p { "Logged sessions: {counts.logged}" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
            div { class: "actions",
                Link { class: "btn primary", to: Route::Start {}, "Start a problem" }
                Link { class: "btn", to: Route::Review {}, "Today's reviews" }
            }
        }
    }
}
