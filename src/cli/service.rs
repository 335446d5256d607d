//! Add, edit, remove and list commands

use std::io::{BufRead, Write};

use totp_core::error::CoreError;
use totp_core::manager::CredentialManager;

use crate::cli::console::Console;
use crate::cli::menu::{select_service, NO_SERVICES_HINT};

/// Prompt for a name and secret and add a new service
pub fn run_add<R: BufRead, W: Write>(
    manager: &mut CredentialManager,
    console: &mut Console<R, W>,
) -> Result<bool, CoreError> {
    let name = console.prompt_input("Enter the name of this service: ")?;
    if name.trim().is_empty() {
        console.line("The service name cannot be empty.")?;
        return Ok(false);
    }

    let secret = console.prompt_input("Enter the TOTP secret: ")?;
    if secret.trim().is_empty() {
        console.line("The TOTP secret cannot be empty.")?;
        return Ok(false);
    }

    if manager.add_service(&name, secret.trim())? {
        console.line("TOTP service added")?;
        Ok(true)
    } else {
        console.line("There was an error adding this TOTP service. See above for a detailed error.")?;
        Ok(false)
    }
}

/// Select a service, then prompt for a new name and/or secret
pub fn run_edit<R: BufRead, W: Write>(
    manager: &mut CredentialManager,
    console: &mut Console<R, W>,
) -> Result<bool, CoreError> {
    let services = manager.get_services();
    let Some(service) =
        select_service(console, &services, Some("Select a service by number to edit"))?
    else {
        console.line(NO_SERVICES_HINT)?;
        return Ok(false);
    };

    let new_name = loop {
        let name = console
            .prompt_optional("Enter the new name of this service or hit return to leave unchanged: ")?
            .filter(|name| !name.trim().is_empty());
        match name {
            Some(name) if services.contains(&name) => {
                console.line("That service name already exists. Please select a new name!")?;
            }
            other => break other,
        }
    };

    let secret = console
        .prompt_optional("Enter the new TOTP secret or hit return to leave unchanged: ")?
        .map(|secret| secret.trim().to_string())
        .filter(|secret| !secret.is_empty());

    if manager.edit_service(&service, new_name.as_deref(), secret.as_deref())? {
        console.line(&format!("Service {} updated.", service))?;
        Ok(true)
    } else {
        console.line(&format!(
            "Error updating service {}. See above for a detailed error.",
            service
        ))?;
        Ok(false)
    }
}

/// Select a service and remove it
pub fn run_remove<R: BufRead, W: Write>(
    manager: &mut CredentialManager,
    console: &mut Console<R, W>,
) -> Result<bool, CoreError> {
    let services = manager.get_services();
    let Some(service) =
        select_service(console, &services, Some("Select a service by number to remove"))?
    else {
        console.line(NO_SERVICES_HINT)?;
        return Ok(false);
    };

    manager.rm_service(&service)?;
    console.line(&format!("Removed service {}", service))?;
    Ok(true)
}

/// Print every service name, one per line
pub fn run_list<R: BufRead, W: Write>(
    manager: &CredentialManager,
    console: &mut Console<R, W>,
) -> Result<bool, CoreError> {
    let services = manager.get_services();
    if services.is_empty() {
        console.line(NO_SERVICES_HINT)?;
        return Ok(false);
    }

    for service in &services {
        console.line(service)?;
    }
    Ok(true)
}
