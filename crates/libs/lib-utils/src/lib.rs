//! # Utilities Library
//!
//! Shared helpers for base64url encoding, environment variables, time and input validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64u_encode, b64u_decode};
pub use envs::{get_env, get_env_or, get_env_parse_or};
pub use time::{now_utc, format_time, Clock, FixedClock, SystemClock};
pub use validation::{validate_email, validate_min_length, validate_length_range};
