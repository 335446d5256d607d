//! One-time password module
//!
//! Handles base32 secret decoding and TOTP generation.

pub mod base32;
pub mod totp;

pub use self::totp::{Clock, FixedClock, SystemClock};
