//! Reversible, NON-cryptographic transforms.
//!
//! Nothing in this module provides confidentiality or integrity against
//! anyone who wants to undo it. XOR with a repeating key, Caesar shifts and
//! additive checksums are for masking data on screen, shaping opaque strings
//! and catching accidental corruption. Use a real AEAD/MAC crate for secrets.
//!
//! The module is a sibling of [`crate::auth`] and is not re-exported from it.

pub mod cipher;
pub mod encoding;
pub mod integrity;
pub mod mask;
pub mod random;

pub use cipher::{caesar_decrypt, caesar_encrypt, deobfuscate, obfuscate, rot13, xor};
pub use encoding::{base64_decode, base64_encode, base64_url_decode, base64_url_encode};
pub use integrity::{
    generate_checksum, issue_timed_token, issue_timed_token_at, validate_checksum,
    verify_timed_token, verify_timed_token_at,
};
pub use mask::{mask_email, mask_string};
pub use random::{generate_csrf_token, generate_random_string, random_bytes, Generated, RandomSource};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObfuscationError {
    #[error("obfuscation: input is not valid base64")]
    InvalidBase64,
    #[error("obfuscation: decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}
