//! Base64 helpers over UTF-8 text.
//!
//! The URL-safe variants swap `+`/`/` for `-`/`_` and drop the `=` padding on
//! encode; decode accepts input with or without padding.

use super::ObfuscationError;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

pub fn base64_encode(data: impl AsRef<[u8]>) -> String {
    STANDARD.encode(data)
}

pub fn base64_decode(encoded: &str) -> Result<String, ObfuscationError> {
    let bytes = base64_decode_bytes(encoded)?;
    String::from_utf8(bytes).map_err(|_| ObfuscationError::InvalidUtf8)
}

pub(crate) fn base64_decode_bytes(encoded: &str) -> Result<Vec<u8>, ObfuscationError> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|_| ObfuscationError::InvalidBase64)
}

pub fn base64_url_encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

pub fn base64_url_decode(encoded: &str) -> Result<String, ObfuscationError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.trim().trim_end_matches('='))
        .map_err(|_| ObfuscationError::InvalidBase64)?;
    String::from_utf8(bytes).map_err(|_| ObfuscationError::InvalidUtf8)
}
