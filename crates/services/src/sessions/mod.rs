mod queries;
mod sample;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use queries::{logged_sessions, today_reviews};
pub use service::SessionService;
