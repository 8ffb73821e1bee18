use std::sync::Arc;

use practice_core::model::JudgeReport;
use serde::Serialize;
use serde_json::{Value, json};

use super::coerce::coerce_submission;
use super::transport::WebhookTransport;
use crate::error::SubmissionError;

/// Longest slice of an unparseable webhook body echoed back to the caller.
pub const RAW_RESPONSE_LIMIT: usize = 500;

/// Status and JSON body returned to whoever submitted the code.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub status: u16,
    pub body: Value,
}

impl RelayReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The judge verdict carried by a successful reply, if it has one.
    #[must_use]
    pub fn judge_report(&self) -> Option<JudgeReport> {
        if !self.is_success() {
            return None;
        }
        serde_json::from_value(self.body.clone()).ok()
    }

    /// The `error` message of a failed reply.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        if self.is_success() {
            return None;
        }
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<SubmissionError> for RelayReply {
    fn from(err: SubmissionError) -> Self {
        let status = err.status();
        let body = match err {
            SubmissionError::MissingCode | SubmissionError::EmptyResponse => {
                json!({ "error": err.to_string() })
            }
            SubmissionError::RemoteStatus { status, details } => json!({
                "error": format!("webhook request failed: HTTP {status}"),
                "details": details,
            }),
            SubmissionError::UnparseableResponse { details, raw } => json!({
                "error": "could not parse the webhook response",
                "details": details,
                "rawResponse": raw,
            }),
            SubmissionError::MalformedRequest(details) | SubmissionError::Transport(details) => {
                json!({ "error": "internal server error", "details": details })
            }
        };
        Self { status, body }
    }
}

/// Submission as the solve screen builds it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_min: Option<u32>,
    pub hint_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_report_difficulty: Option<u8>,
}

/// Validates submissions, forwards them to the judging webhook, and turns
/// whatever comes back into a `RelayReply`.
#[derive(Clone)]
pub struct SubmissionRelay {
    transport: Arc<dyn WebhookTransport>,
}

impl SubmissionRelay {
    #[must_use]
    pub fn new(transport: Arc<dyn WebhookTransport>) -> Self {
        Self { transport }
    }

    /// Handle a raw inbound request body.
    pub async fn handle(&self, raw_body: &str) -> RelayReply {
        match serde_json::from_str::<Value>(raw_body) {
            Ok(body) => self.handle_value(&body).await,
            Err(err) => {
                tracing::warn!(error = %err, "inbound submission is not valid JSON");
                SubmissionError::MalformedRequest(err.to_string()).into()
            }
        }
    }

    /// Handle a typed submission from within the app.
    pub async fn submit(&self, request: &SubmissionRequest) -> RelayReply {
        match serde_json::to_value(request) {
            Ok(body) => self.handle_value(&body).await,
            Err(err) => SubmissionError::MalformedRequest(err.to_string()).into(),
        }
    }

    async fn handle_value(&self, body: &Value) -> RelayReply {
        match self.forward(body).await {
            Ok(data) => RelayReply {
                status: 200,
                body: data,
            },
            Err(err) => err.into(),
        }
    }

    async fn forward(&self, body: &Value) -> Result<Value, SubmissionError> {
        let payload = coerce_submission(body)?;
        tracing::debug!(
            problem_id = payload.problem_id,
            code_len = payload.code.len(),
            "forwarding submission"
        );

        let response = self.transport.post(&payload).await.inspect_err(|err| {
            tracing::error!(error = %err, "webhook transport failed");
        })?;

        if !response.is_success() {
            tracing::warn!(status = response.status, "webhook returned an error status");
            return Err(SubmissionError::RemoteStatus {
                status: response.status,
                details: response.body,
            });
        }

        if response.body.trim().is_empty() {
            tracing::warn!("webhook returned an empty body");
            return Err(SubmissionError::EmptyResponse);
        }

        serde_json::from_str(&response.body).map_err(|err| {
            tracing::warn!(error = %err, "webhook body is not JSON");
            SubmissionError::UnparseableResponse {
                details: err.to_string(),
                raw: response.body.chars().take(RAW_RESPONSE_LIMIT).collect(),
            }
        })
    }
}
