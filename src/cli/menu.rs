//! Numbered service selection menu

use std::io::{self, BufRead, Write};

use crate::cli::console::Console;

/// Shown when there is nothing to list or select
pub const NO_SERVICES_HINT: &str =
    "It appears you have not loaded any TOTP data. Please add a TOTP service. Run with --help for more.";

const DEFAULT_PROMPT: &str = "Select a service by number";

/// Render menu lines, numbering from 1 and right-aligning the numbers to
/// the width of the largest one
pub fn menu_lines(services: &[String]) -> Vec<String> {
    let width = services.len().to_string().len();
    services
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>width$}: {}", i + 1, name, width = width))
        .collect()
}

/// Print the menu and read a selection, re-prompting until it is valid.
///
/// Returns `None` without prompting when `services` is empty.
pub fn select_service<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    services: &[String],
    prompt_msg: Option<&str>,
) -> io::Result<Option<String>> {
    if services.is_empty() {
        return Ok(None);
    }

    for line in menu_lines(services) {
        console.line(&line)?;
    }

    let prompt = format!("\n{}: ", prompt_msg.unwrap_or(DEFAULT_PROMPT));
    loop {
        let answer = console.prompt_input(&prompt)?;
        if let Ok(choice) = answer.trim().parse::<usize>() {
            if (1..=services.len()).contains(&choice) {
                return Ok(Some(services[choice - 1].clone()));
            }
        }
        console.line("Your selection is not valid. Try again.")?;
    }
}
