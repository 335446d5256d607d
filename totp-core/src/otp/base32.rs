//! Base32 decoding for TOTP secrets
//!
//! Secrets are decoded leniently in the same way most authenticator apps
//! accept them:
//! 1. Letters are case-insensitive
//! 2. Missing `=` padding is appended up to an 8-character boundary
//! 3. Unused trailing bits are ignored
//!
//! Failures are split into two kinds because they point at different
//! mistakes: a bad symbol usually means the wrong value was entered, bad
//! padding usually means the secret was truncated.

use data_encoding::{Encoding, Specification};

use crate::error::OtpError;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Pad input string to 8-character boundaries
///
/// Formula: padding_length = (8 - (len % 8)) % 8
fn pad(input: &str) -> String {
    let padding_len = (8 - (input.len() % 8)) % 8;
    format!("{}{}", input, "=".repeat(padding_len))
}

/// Check for a symbol that can never appear in a base32 secret.
///
/// `=` is only allowed as a trailing run.
fn has_invalid_symbol(input: &str) -> bool {
    let mut seen_padding = false;
    for c in input.chars() {
        if c == '=' {
            seen_padding = true;
            continue;
        }
        if seen_padding || !ALPHABET.contains(c.to_ascii_uppercase()) || !c.is_ascii() {
            return true;
        }
    }
    false
}

fn encoding() -> Result<Encoding, OtpError> {
    let mut spec = Specification::new();
    spec.symbols.push_str(ALPHABET);
    spec.padding = Some('=');
    spec.check_trailing_bits = false;
    spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
    spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    spec.encoding().map_err(|_| OtpError::InvalidPadding)
}

/// Decode a base32 secret to raw key bytes
pub fn decode_base32(input: &str) -> Result<Vec<u8>, OtpError> {
    if has_invalid_symbol(input) {
        return Err(OtpError::InvalidCharacter);
    }

    let padded = pad(input);
    encoding()?
        .decode(padded.as_bytes())
        .map_err(|_| OtpError::InvalidPadding)
}
