//! OS login name resolution
//!
//! The login name is the account half of the credential store address, so
//! every user on a machine gets their own credential set.

use crate::error::StoreError;

/// Resolve the login name of the user running this process
pub fn current_user() -> Result<String, StoreError> {
    #[cfg(unix)]
    {
        use nix::unistd::{getuid, User};

        if let Ok(Some(user)) = User::from_uid(getuid()) {
            return Ok(user.name);
        }
    }

    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
        .ok_or_else(|| StoreError::Init {
            reason: "could not determine the current user name".to_string(),
        })
}
