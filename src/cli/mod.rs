//! CLI command implementations
//!
//! This module contains the implementation of every CLI action. Handlers
//! return `Ok(true)` on success and `Ok(false)` on an operational failure
//! that has already been reported to the user.

use totp_core::config::Settings;

use crate::platform::Clipboard;

pub mod console;
pub mod generate;
pub mod menu;
pub mod service;
pub mod transfer;

/// Process-wide context built once at startup
pub struct AppContext {
    pub settings: Settings,
    pub clipboard: Box<dyn Clipboard>,
}
