use std::cmp::Reverse;

use chrono::{DateTime, TimeZone};
use practice_core::model::Session;

/// Sessions scheduled for review on `reference`'s calendar day.
///
/// The day is read in `reference`'s own time zone. Sessions without a
/// `review_at`, or not in `SCHEDULED`, are left out. Ordered by `review_at`,
/// then `created_at`.
#[must_use]
pub fn today_reviews<Tz: TimeZone>(sessions: &[Session], reference: &DateTime<Tz>) -> Vec<Session> {
    let mut due: Vec<Session> = sessions
        .iter()
        .filter(|session| session.is_due_on(reference))
        .cloned()
        .collect();
    due.sort_by_key(|session| (session.review_at(), session.created_at()));
    due
}

/// Sessions with a quick log, most recently logged first.
///
/// Ties on `logged_at` go to the most recently updated session.
#[must_use]
pub fn logged_sessions(sessions: &[Session]) -> Vec<Session> {
    let mut logged: Vec<Session> = sessions
        .iter()
        .filter(|session| session.is_logged())
        .cloned()
        .collect();
    logged.sort_by_key(|session| {
        Reverse((
            session.logged_at().unwrap_or_else(|| session.updated_at()),
            session.updated_at(),
        ))
    });
    logged
}
