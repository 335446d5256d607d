//! Configuration module
//!
//! Handles loading application settings from TOML files. Settings never
//! contain secrets; those live in the credential store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod toml_config;

/// Which credential store backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// System keyring
    #[default]
    Keyring,
    /// Plain JSON file at `StoreSettings::path`
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Credential file, required for the file backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardSettings {
    /// Program and arguments that read the text to copy from stdin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

/// Application settings
///
/// Loaded once at startup and passed explicitly to whatever needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub clipboard: ClipboardSettings,
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.store.backend == StoreBackend::File {
            match &self.store.path {
                None => return Err("store.path is required for the file backend".to_string()),
                Some(path) if path.as_os_str().is_empty() => {
                    return Err("store.path cannot be empty".to_string())
                }
                Some(_) => {}
            }
        }

        if let Some(command) = &self.clipboard.command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return Err("clipboard.command cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
