mod coerce;
mod relay;
mod transport;

pub use crate::error::SubmissionError;
pub use coerce::{
    DEFAULT_PROBLEM_ID, DEFAULT_SELF_REPORT_DIFFICULTY, DEFAULT_TIME_SPENT_MIN, DEFAULT_USER_ID,
    OutboundSubmission, SUBMISSION_LANGUAGE, coerce_submission,
};
pub use relay::{RAW_RESPONSE_LIMIT, RelayReply, SubmissionRelay, SubmissionRequest};
pub use transport::{
    DEFAULT_WEBHOOK_URL, HttpWebhookTransport, WebhookConfig, WebhookResponse, WebhookTransport,
};
