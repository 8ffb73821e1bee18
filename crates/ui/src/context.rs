use std::sync::Arc;

use chrono::{DateTime, Local};
use practice_core::ProblemCatalog;
use services::{AppServices, SessionService, SubmissionRelay};

pub trait UiApp: Send + Sync {
    fn sessions(&self) -> Arc<SessionService>;
    fn relay(&self) -> Arc<SubmissionRelay>;
    fn catalog(&self) -> Arc<ProblemCatalog>;
}

impl UiApp for AppServices {
    fn sessions(&self) -> Arc<SessionService> {
        AppServices::sessions(self)
    }

    fn relay(&self) -> Arc<SubmissionRelay> {
        AppServices::relay(self)
    }

    fn catalog(&self) -> Arc<ProblemCatalog> {
        AppServices::catalog(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    sessions: Arc<SessionService>,
    relay: Arc<SubmissionRelay>,
    catalog: Arc<ProblemCatalog>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            sessions: app.sessions(),
            relay: app.relay(),
            catalog: app.catalog(),
        }
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn relay(&self) -> Arc<SubmissionRelay> {
        Arc::clone(&self.relay)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<ProblemCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Service clock reading in the machine's time zone; "today" in every view.
    #[must_use]
    pub fn now_local(&self) -> DateTime<Local> {
        self.sessions.clock().now().with_timezone(&Local)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
