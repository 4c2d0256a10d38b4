//! # Password Hashing
//!
//! Salted PBKDF2-HMAC-SHA256 password hashes.
//!
//! ## Stored format
//!
//! New hashes are written as
//!
//! ```text
//! pbkdf2_sha256$100000$<salt hex>$<digest hex>
//! ```
//!
//! Rows written before the scheme tag existed look like `<salt hex>$<digest hex>`
//! and are verified with the default iteration count.
//!
//! The KDF salt input is the ASCII text of the hex salt, not the decoded bytes.
//! Existing rows were derived that way, so it must stay that way.

use crate::error::{Error, Result};
use crate::rng::{OsRandom, SecureRandom};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// PBKDF2 iteration count for new hashes and for legacy hashes without a tag.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes (rendered as 32 hex chars).
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes, the SHA-256 output size.
pub const DIGEST_LEN: usize = 32;

/// Highest iteration count accepted from a stored hash.
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

const SCHEME_TAG: &str = "pbkdf2_sha256";

/// Salt used to burn one KDF pass when there is no stored hash to check against.
const DUMMY_SALT: &str = "00000000000000000000000000000000";

/// Encoding scheme a [`PasswordHash`] was read from or will be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `salt$digest`, no tag, fixed iteration count.
    Legacy,
    /// `pbkdf2_sha256$iterations$salt$digest`.
    Pbkdf2Sha256,
}

/// A parsed password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    scheme: Scheme,
    iterations: u32,
    salt: String,
    digest: [u8; DIGEST_LEN],
}

impl PasswordHash {
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hex-rendered salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Re-derive with this hash's salt and cost, and compare in constant time.
    pub fn matches(&self, password: &str) -> bool {
        let candidate = derive(password, &self.salt, self.iterations);
        constant_time_eq(&candidate, &self.digest)
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Scheme::Legacy => write!(f, "{}${}", self.salt, self.digest_hex()),
            Scheme::Pbkdf2Sha256 => write!(
                f,
                "{}${}${}${}",
                SCHEME_TAG,
                self.iterations,
                self.salt,
                self.digest_hex()
            ),
        }
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("scheme", &self.scheme)
            .field("iterations", &self.iterations)
            .field("salt", &self.salt)
            .field("digest", &"<redacted>")
            .finish()
    }
}

impl FromStr for PasswordHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('$').collect();

        let (scheme, iterations, salt, digest) = match parts.as_slice() {
            [salt, digest] => (Scheme::Legacy, PBKDF2_ITERATIONS, *salt, *digest),
            [tag, iterations, salt, digest] => {
                if *tag != SCHEME_TAG {
                    return Err(Error::MalformedHash(format!("unknown scheme tag '{}'", tag)));
                }
                let iterations = iterations
                    .parse::<u32>()
                    .ok()
                    .filter(|n| (1..=MAX_PBKDF2_ITERATIONS).contains(n))
                    .ok_or_else(|| Error::MalformedHash("invalid iteration count".to_string()))?;
                (Scheme::Pbkdf2Sha256, iterations, *salt, *digest)
            }
            [_] => return Err(Error::MalformedHash("missing '$' delimiter".to_string())),
            _ => {
                return Err(Error::MalformedHash(format!(
                    "unexpected number of fields ({})",
                    parts.len()
                )))
            }
        };

        if salt.is_empty() || hex::decode(salt).is_err() {
            return Err(Error::MalformedHash("salt is not valid hex".to_string()));
        }

        let digest_bytes = hex::decode(digest)
            .map_err(|_| Error::MalformedHash("digest is not valid hex".to_string()))?;
        let digest: [u8; DIGEST_LEN] = digest_bytes.try_into().map_err(|_| {
            Error::MalformedHash(format!("digest must be {} bytes", DIGEST_LEN))
        })?;

        Ok(Self {
            scheme,
            iterations,
            salt: salt.to_string(),
            digest,
        })
    }
}

/// Derives and verifies password hashes.
///
/// Cloning is cheap; the random source is shared.
#[derive(Clone)]
pub struct CredentialCodec {
    rng: Arc<dyn SecureRandom>,
}

impl Default for CredentialCodec {
    fn default() -> Self {
        Self::new(Arc::new(OsRandom))
    }
}

impl CredentialCodec {
    pub fn new(rng: Arc<dyn SecureRandom>) -> Self {
        Self { rng }
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Deliberately slow. Async callers should run this on a blocking thread.
    pub fn hash(&self, password: &str) -> PasswordHash {
        let salt = hex::encode(self.rng.bytes(SALT_LEN));
        let digest = derive(password, &salt, PBKDF2_ITERATIONS);

        PasswordHash {
            scheme: Scheme::Pbkdf2Sha256,
            iterations: PBKDF2_ITERATIONS,
            salt,
            digest,
        }
    }

    /// Verify a password against a stored hash string.
    ///
    /// Returns `Ok(false)` for a wrong password and [`Error::MalformedHash`]
    /// only when `stored` cannot be parsed.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool> {
        let parsed: PasswordHash = stored.parse()?;
        Ok(parsed.matches(password))
    }

    /// Spend one full KDF pass without a stored hash.
    ///
    /// Login calls this when the account does not exist, so that the response
    /// time does not reveal whether it does.
    pub fn verify_dummy(&self, password: &str) {
        let _ = derive(password, DUMMY_SALT, PBKDF2_ITERATIONS);
    }
}

/// Hash a password using the OS random source.
pub fn hash_password(password: &str) -> PasswordHash {
    CredentialCodec::default().hash(password)
}

/// Verify a plaintext password against a stored hash string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    CredentialCodec::default().verify(password, stored)
}

fn derive(password: &str, salt_hex: &str, iterations: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt_hex.as_bytes(), iterations, &mut out);
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
