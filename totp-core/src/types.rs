//! Type definitions and wrappers for secure data handling
//!
//! This module provides type-safe wrappers for sensitive data using the
//! secrecy crate to prevent accidental exposure in logs or debug output,
//! plus the persisted shape of the credential set.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Service identifier under which the credential blob is stored
pub const STORE_SERVICE_ID: &str = "totp_generator";

/// Wrapper for base32-encoded TOTP secrets
///
/// This type ensures secrets are never accidentally logged or exposed
/// in debug output. Well-formedness is not checked on construction; a
/// malformed secret only surfaces when a code is generated from it.
#[derive(Clone, Debug)]
pub struct OtpSecret(Secret<String>);

impl OtpSecret {
    /// Create a new OtpSecret from a base32-encoded string
    pub fn new(secret: String) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the secret value (use with caution!)
    ///
    /// This should only be called when absolutely necessary,
    /// such as when passing to cryptographic functions or serializing
    /// the credential set back into the store.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for OtpSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for OtpSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_string())
    }
}

impl PartialEq for OtpSecret {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for OtpSecret {}

impl Serialize for OtpSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for OtpSecret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Wrapper for generated TOTP tokens
///
/// Generated OTP tokens should also be treated as sensitive data
/// and never logged, even though they have a short lifetime.
#[derive(Clone, Debug)]
pub struct TotpToken(Secret<String>);

impl TotpToken {
    /// Create a new TotpToken from a generated token string
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    /// Expose the token value (use with caution!)
    ///
    /// This should only be called when printing the token or handing it
    /// to the clipboard.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for TotpToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// One TOTP-protected service
///
/// Only `code` is interpreted. Any other fields found in the stored or
/// imported JSON are carried along untouched so that renames and
/// re-exports do not drop them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Base32 shared secret
    pub code: OtpSecret,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ServiceRecord {
    pub fn new(code: impl Into<OtpSecret>) -> Self {
        Self {
            code: code.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Service name to record mapping
///
/// Names are compared by exact string equality. The ordered map keeps
/// iteration in ascending lexicographic order.
pub type CredentialSet = BTreeMap<String, ServiceRecord>;
