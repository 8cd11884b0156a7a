//! Weak integrity helpers.
//!
//! The additive checksum only catches accidental corruption; reordering the
//! input, or any edit that keeps the sum, goes unnoticed. Timed tokens are
//! plain base64 of `data:unix_seconds` and can be forged by anyone.

use super::encoding::{base64_decode, base64_encode};
use chrono::{DateTime, Utc};

/// Sum of the Unicode scalar values of `data`, as lowercase hex.
pub fn generate_checksum(data: &str) -> String {
    let sum = data
        .chars()
        .fold(0u64, |acc, c| acc.wrapping_add(u64::from(u32::from(c))));
    format!("{sum:x}")
}

/// Hex comparison is case-insensitive.
pub fn validate_checksum(data: &str, expected: &str) -> bool {
    generate_checksum(data).eq_ignore_ascii_case(expected.trim())
}

pub fn issue_timed_token(data: &str) -> String {
    issue_timed_token_at(data, Utc::now())
}

pub fn issue_timed_token_at(data: &str, now: DateTime<Utc>) -> String {
    base64_encode(format!("{data}:{}", now.timestamp()))
}

pub fn verify_timed_token(token: &str, expected_data: &str, max_age_seconds: u64) -> bool {
    verify_timed_token_at(token, expected_data, max_age_seconds, Utc::now())
}

/// Embedded data must equal `expected_data` exactly and the token must be at
/// most `max_age_seconds` old. Anything undecodable is rejected.
pub fn verify_timed_token_at(
    token: &str,
    expected_data: &str,
    max_age_seconds: u64,
    now: DateTime<Utc>,
) -> bool {
    let Ok(decoded) = base64_decode(token) else {
        return false;
    };
    // The data itself may contain ':'; the timestamp is after the last one.
    let Some((data, issued_at)) = decoded.rsplit_once(':') else {
        return false;
    };
    let Ok(issued_at) = issued_at.parse::<i64>() else {
        return false;
    };
    let max_age = i64::try_from(max_age_seconds).unwrap_or(i64::MAX);

    data == expected_data && now.timestamp().saturating_sub(issued_at) <= max_age
}
