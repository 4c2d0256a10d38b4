//! # Secure Randomness
//!
//! The random source behind salts and session tokens.

use rand::{rngs::OsRng, RngCore};

/// Cryptographically secure byte source, shared across concurrent requests.
pub trait SecureRandom: Send + Sync {
    /// Return `n` fresh random bytes.
    fn bytes(&self, n: usize) -> Vec<u8>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        OsRng.fill_bytes(&mut buf);
        buf
    }
}
