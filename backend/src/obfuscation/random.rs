//! Random strings for CSRF-shaped tokens and identifiers.
//!
//! Bytes come from the operating system's CSPRNG. When that source is
//! unavailable the generator falls back to a time-seeded [`SmallRng`] and
//! reports [`RandomSource::WeakFallback`]; output from that path is
//! predictable and must not be used as a security token.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const CSRF_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomSource {
    Os,
    WeakFallback,
}

impl RandomSource {
    pub fn is_secure(self) -> bool {
        self == RandomSource::Os
    }
}

/// A generated value tagged with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub value: String,
    pub source: RandomSource,
}

pub fn random_bytes(len: usize) -> (Vec<u8>, RandomSource) {
    let mut buf = vec![0u8; len];
    match getrandom::fill(&mut buf) {
        Ok(()) => (buf, RandomSource::Os),
        Err(err) => {
            tracing::warn!(error = %err, "OS randomness unavailable, using weak PRNG fallback");
            (weak_bytes(len), RandomSource::WeakFallback)
        }
    }
}

fn weak_bytes(len: usize) -> Vec<u8> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    let mut rng = SmallRng::seed_from_u64(nanos ^ u64::from(std::process::id()));
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

/// `len` characters from `[A-Za-z0-9]`, without modulo bias.
pub fn generate_random_string(len: usize) -> Generated {
    // Largest multiple of the alphabet size that fits in a byte.
    let limit = (256 / ALPHANUMERIC.len() * ALPHANUMERIC.len()) as u8;
    let mut value = String::with_capacity(len);
    let mut source = RandomSource::Os;

    while value.len() < len {
        let (bytes, batch_source) = random_bytes(len - value.len() + 8);
        if !batch_source.is_secure() {
            source = RandomSource::WeakFallback;
        }
        for byte in bytes.into_iter().filter(|byte| *byte < limit) {
            if value.len() == len {
                break;
            }
            value.push(char::from(ALPHANUMERIC[usize::from(byte) % ALPHANUMERIC.len()]));
        }
    }

    Generated { value, source }
}

/// 32 random bytes, hex-encoded.
pub fn generate_csrf_token() -> Generated {
    let (bytes, source) = random_bytes(CSRF_TOKEN_BYTES);
    Generated {
        value: hex::encode(bytes),
        source,
    }
}
