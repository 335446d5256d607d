//! Process display name
//!
//! Keyring unlock prompts show the requesting program by name, so the
//! process presents itself as the tool rather than a generic binary path.

use tracing::info;

pub trait ProcessTitle {
    /// Set the title; returns whether it took effect
    fn set(&self, title: &str) -> bool;
}

/// Sets the thread name of the main thread through `prctl(PR_SET_NAME)`
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct PrctlTitle;

#[cfg(target_os = "linux")]
impl ProcessTitle for PrctlTitle {
    fn set(&self, title: &str) -> bool {
        let Ok(name) = std::ffi::CString::new(title.replace(' ', "-")) else {
            return false;
        };
        match nix::sys::prctl::set_name(&name) {
            Ok(()) => true,
            Err(e) => {
                info!("Unable to set process title: {}", e);
                false
            }
        }
    }
}

/// Used where the platform offers no way to rename the process
#[cfg_attr(target_os = "linux", allow(dead_code))]
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTitle;

#[cfg_attr(target_os = "linux", allow(dead_code))]
impl ProcessTitle for NullTitle {
    fn set(&self, _title: &str) -> bool {
        info!("Process titles are not supported on this platform. Unable to set process title.");
        false
    }
}

/// Implementation for the current platform
pub fn select_title() -> Box<dyn ProcessTitle> {
    #[cfg(target_os = "linux")]
    {
        Box::new(PrctlTitle)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NullTitle)
    }
}
