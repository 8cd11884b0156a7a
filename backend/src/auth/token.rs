//! Non-verifying codec for compact three-part tokens (`header.payload.signature`).
//!
//! # Not an authenticity check
//!
//! Nothing in this module verifies the signature. [`is_valid`] means "well
//! formed and inside its declared time window", not "issued by someone you
//! trust". Callers must get the token from a trusted issuer over a trusted
//! transport before acting on its claims.
//!
//! Every time-dependent query has an `*_at` form taking the current instant
//! explicitly; the short form uses [`Utc::now`].

use super::claims::Claims;
use super::errors::{Segment, TokenError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

pub const EXPIRED_LABEL: &str = "token expired";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    #[serde(rename = "alg", default)]
    pub algorithm: String,
    #[serde(rename = "typ", default)]
    pub token_type: String,
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

/// A structurally valid token. Header, payload and signature are present
/// together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub header: TokenHeader,
    pub payload: Claims,
    /// Raw trailing segment, never checked.
    pub signature: String,
}

/// Strict decode that reports why a token is malformed.
pub fn try_decode(token: &str) -> Result<DecodedToken, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(TokenError::SegmentCount(parts.len()));
    };

    let header = decode_object(header, Segment::Header)?;
    let header: TokenHeader = serde_json::from_value(Value::Object(header))
        .map_err(|_| TokenError::Json {
            segment: Segment::Header,
        })?;
    let payload = decode_object(payload, Segment::Payload)?;

    Ok(DecodedToken {
        header,
        payload: Claims::new(payload),
        signature: (*signature).to_string(),
    })
}

/// Total decode: any structural failure yields `None`.
pub fn decode(token: &str) -> Option<DecodedToken> {
    try_decode(token).ok()
}

pub fn decode_payload(token: &str) -> Option<Claims> {
    decode(token).map(|decoded| decoded.payload)
}

fn decode_object(segment: &str, which: Segment) -> Result<Map<String, Value>, TokenError> {
    // Some issuers keep the padding; base64url proper drops it.
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|_| TokenError::Base64 { segment: which })?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(TokenError::Json { segment: which }),
    }
}

/// Exactly three non-empty dot-separated segments. Says nothing about content.
pub fn is_plausible_token(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|part| !part.is_empty())
}

/// Strips a case-insensitive `Bearer ` prefix from an Authorization header value.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let header = header.trim();
    let (scheme, rest) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// Missing payload or missing `exp` counts as expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match decode_payload(token).and_then(|claims| claims.expires_at()) {
        Some(exp) => exp <= now.timestamp(),
        None => true,
    }
}

pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, Utc::now())
}

/// Well formed and within `nbf..exp`. Absent bounds do not invalidate.
pub fn is_valid_at(token: &str, now: DateTime<Utc>) -> bool {
    let Some(claims) = decode_payload(token) else {
        return false;
    };
    let now = now.timestamp();
    if claims.expires_at().is_some_and(|exp| exp <= now) {
        return false;
    }
    if claims.not_before().is_some_and(|nbf| nbf > now) {
        return false;
    }
    true
}

pub fn expiration_date(token: &str) -> Option<DateTime<Utc>> {
    decode_payload(token)?
        .expires_at()
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
}

pub fn issued_at_date(token: &str) -> Option<DateTime<Utc>> {
    decode_payload(token)?
        .issued_at()
        .and_then(|iat| DateTime::from_timestamp(iat, 0))
}

pub fn seconds_until_expiry(token: &str) -> Option<i64> {
    seconds_until_expiry_at(token, Utc::now())
}

/// Remaining lifetime clamped at zero; `None` without a readable `exp`.
pub fn seconds_until_expiry_at(token: &str, now: DateTime<Utc>) -> Option<i64> {
    let exp = decode_payload(token)?.expires_at()?;
    Some(remaining_until(exp, now))
}

// `exp` may sit at either end of the i64 range.
fn remaining_until(exp: i64, now: DateTime<Utc>) -> i64 {
    exp.saturating_sub(now.timestamp()).max(0)
}

pub fn format_time_until_expiry(token: &str) -> String {
    format_time_until_expiry_at(token, Utc::now())
}

pub fn format_time_until_expiry_at(token: &str, now: DateTime<Utc>) -> String {
    humanize_remaining(seconds_until_expiry_at(token, now).unwrap_or(0))
}

/// Renders a remaining duration in its coarsest whole unit: "2 hari",
/// "3 jam", "5 menit", "42 detik".
pub fn humanize_remaining(seconds: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    if seconds <= 0 {
        return EXPIRED_LABEL.to_string();
    }
    if seconds >= DAY {
        format!("{} hari", seconds / DAY)
    } else if seconds >= HOUR {
        format!("{} jam", seconds / HOUR)
    } else if seconds >= MINUTE {
        format!("{} menit", seconds / MINUTE)
    } else {
        format!("{seconds} detik")
    }
}

pub fn expires_within(token: &str, threshold: Duration) -> bool {
    expires_within_at(token, threshold, Utc::now())
}

/// `true` when the token has at most `threshold` left, or no readable `exp`.
pub fn expires_within_at(token: &str, threshold: Duration, now: DateTime<Utc>) -> bool {
    let threshold = i64::try_from(threshold.as_secs()).unwrap_or(i64::MAX);
    match seconds_until_expiry_at(token, now) {
        Some(remaining) => remaining <= threshold,
        None => true,
    }
}

/// Read-only summary of a decoded token, for display and logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub algorithm: String,
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub remaining_seconds: Option<i64>,
    pub expired: bool,
    pub remaining: String,
}

pub fn token_info(token: &str, now: DateTime<Utc>) -> Option<TokenInfo> {
    let decoded = decode(token)?;
    let claims = &decoded.payload;
    let remaining_seconds = claims
        .expires_at()
        .map(|exp| remaining_until(exp, now));

    Some(TokenInfo {
        algorithm: decoded.header.algorithm.clone(),
        user_id: claims.user_id(),
        role: claims.role(),
        email: claims.email(),
        issued_at: claims.issued_at().and_then(|iat| DateTime::from_timestamp(iat, 0)),
        expires_at: claims.expires_at().and_then(|exp| DateTime::from_timestamp(exp, 0)),
        remaining_seconds,
        expired: is_expired_at(token, now),
        remaining: humanize_remaining(remaining_seconds.unwrap_or(0)),
    })
}
