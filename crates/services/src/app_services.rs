use std::sync::Arc;

use practice_core::ProblemCatalog;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::sessions::SessionService;
use crate::submission::{HttpWebhookTransport, SubmissionRelay, WebhookConfig, WebhookTransport};

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    sessions: Arc<SessionService>,
    relay: Arc<SubmissionRelay>,
    catalog: Arc<ProblemCatalog>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP webhook.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        webhook: WebhookConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        tracing::info!(webhook_url = %webhook.url, "services ready");
        let transport: Arc<dyn WebhookTransport> = Arc::new(HttpWebhookTransport::new(webhook));
        Ok(Self::from_parts(&storage, clock, transport))
    }

    /// Wire services from an existing storage and transport.
    #[must_use]
    pub fn from_parts(
        storage: &Storage,
        clock: Clock,
        transport: Arc<dyn WebhookTransport>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionService::new(clock, Arc::clone(&storage.sessions))),
            relay: Arc::new(SubmissionRelay::new(transport)),
            catalog: Arc::new(ProblemCatalog::builtin()),
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
}
