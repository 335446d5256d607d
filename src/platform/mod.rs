//! Platform integration
//!
//! Clipboard and process title are traits with a real implementation and a
//! null one. The null implementation is picked at startup when the real
//! backend is missing, so callers never check for availability themselves.

pub mod clipboard;
pub mod interrupt;
pub mod title;

pub use self::clipboard::Clipboard;
