//! Core library for the keyring TOTP generator
//!
//! This crate provides secure storage of TOTP secrets in the system keyring
//! (or a substitute store) and generation of codes from them.

pub mod error;
pub mod types;

pub mod config;
pub mod manager;
pub mod otp;
pub mod store;
pub mod user;

pub use tracing_subscriber::filter::LevelFilter;

/// Initialize logging infrastructure
///
/// Logs go to the systemd journal when running under systemd without a
/// terminal attached, otherwise to stderr. `verbose` switches to the
/// multi-line formatter that also shows the emitting module.
pub fn init_logging(level: LevelFilter, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Try to use systemd journal logging if available
    #[cfg(target_os = "linux")]
    {
        use std::io::IsTerminal;

        if std::env::var("JOURNAL_STREAM").is_ok() && !std::io::stderr().is_terminal() {
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(level)
                .try_init()?;
            return Ok(());
        }
    }

    if verbose {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .with(level)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .with(level)
            .try_init()?;
    }

    Ok(())
}
