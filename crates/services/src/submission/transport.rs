use async_trait::async_trait;
use reqwest::Client;

use super::coerce::OutboundSubmission;
use crate::error::SubmissionError;

/// Fixed judging webhook used when nothing else is configured.
pub const DEFAULT_WEBHOOK_URL: &str = "https://primary-production-b57a.up.railway.app/webhook/submit";

/// Status and raw body of a webhook reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound half of the relay: one POST per submission.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Send `payload` as JSON and return whatever came back.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::Transport` when no response was received.
    async fn post(&self, payload: &OutboundSubmission) -> Result<WebhookResponse, SubmissionError>;
}

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub url: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEBHOOK_URL.to_string(),
        }
    }
}

/// `reqwest`-backed transport. No retries and no client-side timeout.
#[derive(Clone)]
pub struct HttpWebhookTransport {
    client: Client,
    config: WebhookConfig,
}

impl HttpWebhookTransport {
    #[must_use]
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn post(&self, payload: &OutboundSubmission) -> Result<WebhookResponse, SubmissionError> {
        let response = self
            .client
            .post(&self.config.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        Ok(WebhookResponse { status, body })
    }
}
