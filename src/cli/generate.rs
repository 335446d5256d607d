//! Code generation command
//!
//! Prints the current code for a service picked from the menu or named on
//! the command line, and optionally copies it to the clipboard.

use std::io::{BufRead, Write};

use totp_core::error::{CoreError, OtpError};
use totp_core::manager::CredentialManager;
use tracing::warn;

use crate::cli::console::Console;
use crate::cli::menu::{select_service, NO_SERVICES_HINT};
use crate::platform::Clipboard;

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Service named on the command line instead of picked from the menu
    pub service: Option<String>,
    /// Copy the code to the clipboard
    pub copy: bool,
    /// With `copy`, do not print the code
    pub quiet: bool,
}

pub fn run_generate<R: BufRead, W: Write>(
    manager: &CredentialManager,
    console: &mut Console<R, W>,
    clipboard: &dyn Clipboard,
    options: &GenerateOptions,
) -> Result<bool, CoreError> {
    let services = manager.get_services();

    let service = match &options.service {
        Some(name) => {
            if !services.contains(name) {
                console.line("That service does not exist")?;
                return Ok(false);
            }
            name.clone()
        }
        None => match select_service(console, &services, None)? {
            Some(service) => service,
            None => {
                console.line(NO_SERVICES_HINT)?;
                return Ok(false);
            }
        },
    };

    let code = match manager.get_totp_code(&service) {
        Ok(code) => code,
        Err(CoreError::Otp(reason @ (OtpError::InvalidCharacter | OtpError::InvalidPadding))) => {
            console.line(&format!(
                "Error generating TOTP code: '{}'. Usually this means you did not provide a valid TOTP code for the service {}",
                reason, service
            ))?;
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    if !(options.quiet && options.copy) {
        console.line(code.expose())?;
        if options.service.is_none() {
            console.line("")?;
        }
    }

    if options.copy {
        if let Err(e) = clipboard.copy(code.expose()) {
            warn!("Unable to copy the code to the clipboard ({}): {}", clipboard.name(), e);
        }
    }

    Ok(true)
}
