//! Ctrl+C handling
//!
//! Interrupting a prompt ends the program quietly with a short message and
//! exit status 0 instead of the default signal death.

use tracing::info;

/// Printed when the user interrupts the program
#[cfg_attr(not(unix), allow(dead_code))]
pub const EXIT_MESSAGE: &str = "\nExiting...\n";

#[cfg(unix)]
extern "C" fn handle_interrupt(_signal: nix::libc::c_int) {
    // Only async-signal-safe calls are allowed here
    unsafe {
        nix::libc::write(
            nix::libc::STDOUT_FILENO,
            EXIT_MESSAGE.as_ptr().cast(),
            EXIT_MESSAGE.len(),
        );
        nix::libc::_exit(0);
    }
}

/// Install the SIGINT handler; returns whether it is active
#[cfg(unix)]
pub fn install_interrupt_handler() -> bool {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(handle_interrupt),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only calls write(2) and _exit(2)
    match unsafe { sigaction(Signal::SIGINT, &action) } {
        Ok(_) => true,
        Err(e) => {
            info!("Unable to install interrupt handler: {}", e);
            false
        }
    }
}

#[cfg(not(unix))]
pub fn install_interrupt_handler() -> bool {
    info!("Interrupt handling is not supported on this platform.");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_message() {
        assert_eq!(EXIT_MESSAGE.trim(), "Exiting...");
    }

    #[cfg(unix)]
    #[test]
    fn test_install_interrupt_handler() {
        assert!(install_interrupt_handler());
    }
}
