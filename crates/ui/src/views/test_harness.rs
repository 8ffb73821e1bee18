use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use practice_core::model::SessionId;
use practice_core::time::fixed_now;
use services::submission::OutboundSubmission;
use services::{AppServices, Clock, SubmissionError, WebhookResponse, WebhookTransport};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, LogView, ReviewDevView, ReviewView, SolveView, StartView};

/// Webhook stand-in that always returns the same body.
pub struct CannedWebhook(pub &'static str);

#[async_trait::async_trait]
impl WebhookTransport for CannedWebhook {
    async fn post(&self, _payload: &OutboundSubmission) -> Result<WebhookResponse, SubmissionError> {
        Ok(WebhookResponse {
            status: 200,
            body: self.0.to_string(),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Start,
    Solve(SessionId),
    Log,
    Review,
    ReviewDev,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Start => rsx! { StartView {} },
        ViewKind::Solve(id) => rsx! { SolveView { session_id: id.to_string() } },
        ViewKind::Log => rsx! { LogView {} },
        ViewKind::Review => rsx! { ReviewView {} },
        ViewKind::ReviewDev => rsx! { ReviewDevView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    /// Build the DOM and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// In-memory services on a fixed clock, answering every submission with `PASS`.
pub fn test_services() -> AppServices {
    services_on(&Storage::in_memory(), Clock::fixed(fixed_now()))
}

/// Services over an existing store, so several clocks can share one.
pub fn services_on(storage: &Storage, clock: Clock) -> AppServices {
    AppServices::from_parts(
        storage,
        clock,
        Arc::new(CannedWebhook(r#"{"verdict":"PASS","confidence":0.9,"reasons":[]}"#)),
    )
}

pub fn setup_view_harness(view: ViewKind, services: AppServices) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(services),
            view,
        },
    );
    ViewHarness { dom }
}
