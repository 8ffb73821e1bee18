#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;
pub mod submission;

pub use practice_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, SessionError, SubmissionError};
pub use sessions::{SessionService, logged_sessions, today_reviews};
pub use submission::{
    HttpWebhookTransport, RelayReply, SubmissionRelay, SubmissionRequest, WebhookConfig,
    WebhookResponse, WebhookTransport,
};
