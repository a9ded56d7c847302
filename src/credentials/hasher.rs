//! One-way password digest.
//!
//! A single unsalted SHA-256 round, hex encoded. Identical passwords produce
//! identical digests across accounts, and the hash is fast to brute-force.
//! Stored digests depend on this exact transform, so changing it (for example
//! to a salted, memory-hard KDF) invalidates every existing account.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash a plaintext password into the value persisted by the store.
#[must_use]
pub fn digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
