//! TOTP (Time-based One-Time Password) generation
//!
//! Implements RFC 6238 TOTP using the totp-lite crate: HMAC-SHA1, a 30
//! second time step and six-digit codes.

use totp_lite::Sha1;

use crate::error::OtpError;
use crate::otp::base32::decode_base32;
use crate::types::{OtpSecret, TotpToken};

/// RFC 6238 default time step in seconds
pub const TIME_STEP: u64 = 30;

/// Number of digits in a generated code
pub const DIGITS: u32 = 6;

/// Source of the current Unix time
pub trait Clock {
    fn now(&self) -> Result<u64, OtpError>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, OtpError> {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|_| OtpError::TimeError)
    }
}

/// A clock stopped at a fixed Unix timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> Result<u64, OtpError> {
        Ok(self.0)
    }
}

/// Generate a six-digit TOTP token for `secret` at `timestamp`
pub fn generate_totp(secret: &OtpSecret, timestamp: u64) -> Result<TotpToken, OtpError> {
    let secret_bytes = decode_base32(secret.expose())?;
    let token = totp_lite::totp_custom::<Sha1>(TIME_STEP, DIGITS, &secret_bytes, timestamp);
    Ok(TotpToken::new(token))
}

/// Seconds left before the code generated at `timestamp` rolls over
pub fn seconds_remaining(timestamp: u64) -> u64 {
    TIME_STEP - (timestamp % TIME_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 Appendix B seed for SHA-1, "12345678901234567890"
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn test_rfc6238_vector() {
        // 8-digit reference value 94287082 at T=59
        let token = generate_totp(&OtpSecret::from(RFC_SECRET), 59).unwrap();
        assert_eq!(token.expose(), "287082");
    }

    #[test]
    fn test_token_is_zero_padded() {
        // 8-digit reference value 89005924 at T=1234567890
        let token = generate_totp(&OtpSecret::from(RFC_SECRET), 1234567890).unwrap();
        assert_eq!(token.expose(), "005924");
        assert_eq!(token.expose().len(), 6);
    }

    #[test]
    fn test_same_window_same_code() {
        let secret = OtpSecret::from(RFC_SECRET);
        let start = generate_totp(&secret, 1_111_111_080).unwrap();
        let end = generate_totp(&secret, 1_111_111_109).unwrap();
        assert_eq!(start.expose(), end.expose());
    }

    #[test]
    fn test_malformed_secret() {
        let err = generate_totp(&OtpSecret::from("NOT-BASE32"), 59).unwrap_err();
        assert_eq!(err, OtpError::InvalidCharacter);

        let err = generate_totp(&OtpSecret::from("ABC"), 59).unwrap_err();
        assert_eq!(err, OtpError::InvalidPadding);
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(42).now().unwrap(), 42);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now().unwrap() > 1_577_836_800);
    }

    #[test]
    fn test_seconds_remaining() {
        assert_eq!(seconds_remaining(0), 30);
        assert_eq!(seconds_remaining(59), 1);
        assert_eq!(seconds_remaining(61), 29);
    }
}
