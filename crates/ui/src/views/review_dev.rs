use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Delay before jumping to the review page after the sample is created.
const REDIRECT_DELAY: Duration = Duration::from_secs(1);

async fn due_review_count(ctx: &AppContext) -> Result<usize, ViewError> {
    ctx.sessions()
        .due_reviews(&ctx.now_local())
        .await
        .map(|due| due.len())
        .map_err(|_| ViewError::Unknown)
}

#[component]
pub fn ReviewDevView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut creating = use_signal(|| false);
    let mut created = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);

    let mut due_count = use_resource({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            async move { due_review_count(&ctx).await }
        }
    });
    let state = view_state_from_resource(due_count);

    let on_create = move |_| {
        let sessions = ctx.sessions();
        let now = ctx.now_local();
        spawn(async move {
            creating.set(true);
            match sessions.create_sample_review(&now).await {
                Ok(session) => {
                    tracing::info!(session_id = %session.id(), "sample review created");
                    created.set(true);
                    error.set(None);
                    due_count.restart();
                    tokio::time::sleep(REDIRECT_DELAY).await;
                    navigator.push(Route::Review {});
                }
                Err(err) => {
                    tracing::warn!(error = %err, "creating sample review failed");
                    error.set(Some(ViewError::Unknown));
                }
            }
            creating.set(false);
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Review sandbox" }
            p { class: "muted", "Create a sample review to try out the review screen." }

            match state {
                ViewState::Ready(count) => rsx! {
                    p { "Reviews due today: {count}" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }

            if created() {
                p { class: "success", "Sample review created. Opening the review page..." }
                Link { class: "btn primary", to: Route::Review {}, "Go to reviews" }
            } else {
                button {
                    class: "btn primary",
                    disabled: creating(),
                    onclick: on_create,
                    if creating() { "Creating..." } else { "Create sample review" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Local;
    use practice_core::time::fixed_now;
    use services::Clock;
    use storage::repository::Storage;

    use super::*;
    use crate::context::{UiApp, build_app_context};
    use crate::views::test_harness::services_on;

    #[tokio::test(flavor = "current_thread")]
    async fn due_count_is_read_on_each_load() {
        let storage = Storage::in_memory();
        let app: Arc<dyn UiApp> = Arc::new(services_on(&storage, Clock::fixed(fixed_now())));
        let ctx = build_app_context(&app);
        assert_eq!(due_review_count(&ctx).await.unwrap(), 0);

        ctx.sessions()
            .create_sample_review(&fixed_now().with_timezone(&Local))
            .await
            .unwrap();
        assert_eq!(due_review_count(&ctx).await.unwrap(), 1);
    }
}
