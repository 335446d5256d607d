//! TOML configuration file I/O
//!
//! Handles loading settings from a TOML file in the user's configuration
//! directory. A missing default file is not an error; the defaults apply.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Settings;
use crate::error::{ConfigError, CoreError};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "TOTP_GENERATOR_CONFIG_DIR";

/// Get the default configuration directory
///
/// Returns ~/.config/totp-generator, or TOTP_GENERATOR_CONFIG_DIR if set
pub fn get_config_dir() -> Result<PathBuf, CoreError> {
    // Allow tests to override config directory via environment variable
    if let Ok(config_dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| {
            CoreError::Config(ConfigError::IoError {
                message: "HOME environment variable not set".to_string(),
            })
        })?;

    Ok(PathBuf::from(home).join(".config").join("totp-generator"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, CoreError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the default location, falling back to defaults when
/// no file exists there.
pub fn load_settings() -> Result<Settings, CoreError> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        debug!("No configuration at {:?}, using defaults", config_path);
        return Ok(Settings::default());
    }
    load_settings_from_path(&config_path)
}

/// Load settings from a specific TOML file
///
/// Unlike [`load_settings`], the file must exist.
pub fn load_settings_from_path<P: AsRef<Path>>(path: P) -> Result<Settings, CoreError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::Config(ConfigError::LoadFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        }),
        _ => CoreError::Config(ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        }),
    })?;

    let settings: Settings = toml::from_str(&contents)?;

    settings
        .validate()
        .map_err(|e| CoreError::Config(ConfigError::ValidationError { message: e }))?;

    debug!("Loaded configuration from {:?}", path.as_ref());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;
    use tempfile::tempdir;

    #[test]
    fn test_load_file_backend() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[store]
backend = "file"
path = "/tmp/totp.json"

[clipboard]
command = ["xclip", "-selection", "clipboard"]
"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&config_path).unwrap();
        assert_eq!(settings.store.backend, StoreBackend::File);
        assert_eq!(settings.store.path, Some(PathBuf::from("/tmp/totp.json")));
        assert_eq!(
            settings.clipboard.command,
            Some(vec![
                "xclip".to_string(),
                "-selection".to_string(),
                "clipboard".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        assert_eq!(load_settings_from_path(&config_path).unwrap(), Settings::default());
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp_dir = tempdir().unwrap();
        let result = load_settings_from_path(temp_dir.path().join("absent.toml"));
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[store]\nbackend = \"file\"\n").unwrap();

        assert!(matches!(
            load_settings_from_path(&config_path),
            Err(CoreError::Config(ConfigError::ValidationError { .. }))
        ));
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[store]\nbackend = \"cloud\"\n").unwrap();

        assert!(matches!(
            load_settings_from_path(&config_path),
            Err(CoreError::Toml(_))
        ));
    }
}
