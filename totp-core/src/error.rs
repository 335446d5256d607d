//! Error types for the TOTP generator
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the TOTP generator
#[derive(Error, Debug)]
pub enum CoreError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to the credential store backend
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// The named service is not part of the credential set
    #[error("Service not found: {name}")]
    ServiceNotFound { name: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// Secure-storage backend errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend exists but could not be reached or refused access
    #[error("Credential store unavailable: {reason}")]
    Unavailable { reason: String },

    /// No backend could be selected or an entry handle could not be created
    #[error("Failed to initialize credential store: {reason}")]
    Init { reason: String },

    /// The persisted blob is not a valid credential set
    #[error("Stored credentials are corrupt: {reason}")]
    Corrupt { reason: String },
}

/// OTP/TOTP operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The secret contains a symbol outside the base32 alphabet
    #[error("Non-base32 digit found")]
    InvalidCharacter,

    /// The secret has a symbol count or padding that base32 cannot represent
    #[error("Incorrect padding")]
    InvalidPadding,

    #[error("System time error")]
    TimeError,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CoreError>;
