use chrono::{DateTime, TimeZone, Utc};

/// Absolute local timestamp, e.g. `2023-11-14 22:13`.
#[must_use]
pub fn format_datetime<Tz: TimeZone>(value: DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    value.with_timezone(zone).format("%Y-%m-%d %H:%M").to_string()
}

/// How long ago `at` was, counted in whole 24-hour periods before `now`.
///
/// `Today`, `Yesterday`, `N days ago` below a week, `N weeks ago` below 30
/// days, and the calendar date after that. Timestamps in the future read as
/// `Today`.
#[must_use]
pub fn format_relative_day<Tz: TimeZone>(at: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let days = now.with_timezone(&Utc).signed_duration_since(at).num_days().max(0);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => {
            let weeks = days / 7;
            if weeks == 1 {
                "1 week ago".to_string()
            } else {
                format!("{weeks} weeks ago")
            }
        }
        _ => at.with_timezone(&now.timezone()).format("%B %-d, %Y").to_string(),
    }
}
