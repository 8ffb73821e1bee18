//! Loose-to-strict conversion of inbound submission bodies.
//!
//! Inbound clients send whatever JSON they like; the webhook expects a fixed
//! shape. Numeric fields take the leading integer of the value's string form
//! and fall back to a default when there is none or it is zero.

use serde::Serialize;
use serde_json::Value;

use crate::error::SubmissionError;

pub const DEFAULT_USER_ID: &str = "test-user";
pub const DEFAULT_PROBLEM_ID: i64 = 1000;
pub const DEFAULT_TIME_SPENT_MIN: i64 = 10;
pub const DEFAULT_SELF_REPORT_DIFFICULTY: i64 = 3;
pub const SUBMISSION_LANGUAGE: &str = "python";

/// Payload forwarded to the judging webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundSubmission {
    pub user_id: Value,
    pub problem_id: i64,
    pub language: &'static str,
    pub code: String,
    pub time_spent_min: i64,
    pub hint_used: bool,
    pub self_report_difficulty: i64,
}

/// Validate an inbound body and fill in the webhook defaults.
///
/// # Errors
///
/// Returns `SubmissionError::MissingCode` when `code` is absent, not a string,
/// or blank, and `SubmissionError::MalformedRequest` when the body is `null`.
pub fn coerce_submission(body: &Value) -> Result<OutboundSubmission, SubmissionError> {
    if body.is_null() {
        return Err(SubmissionError::MalformedRequest(
            "request body is null".into(),
        ));
    }
    let code = body
        .get("code")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or(SubmissionError::MissingCode)?;

    let user_id = body
        .get("userId")
        .filter(|value| is_truthy(value))
        .cloned()
        .unwrap_or_else(|| Value::String(DEFAULT_USER_ID.to_string()));

    Ok(OutboundSubmission {
        user_id,
        problem_id: int_or(body.get("problemId"), DEFAULT_PROBLEM_ID),
        language: SUBMISSION_LANGUAGE,
        code: code.to_string(),
        time_spent_min: int_or(body.get("timeSpentMin"), DEFAULT_TIME_SPENT_MIN),
        hint_used: body.get("hintUsed").is_some_and(is_truthy),
        self_report_difficulty: int_or(
            body.get("selfReportDifficulty"),
            DEFAULT_SELF_REPORT_DIFFICULTY,
        ),
    })
}

fn int_or(value: Option<&Value>, fallback: i64) -> i64 {
    let text = value.map_or_else(|| "undefined".to_string(), loose_string);
    match leading_integer(&text) {
        Some(n) if n != 0 => n,
        _ => fallback,
    }
}

/// `false`, `null`, `0`, and `""` are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a JSON value as a loosely typed client would render it.
fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => loose_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Leading base-10 integer after optional whitespace and sign.
fn leading_integer(text: &str) -> Option<i64> {
    let rest = text.trim_start();
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
