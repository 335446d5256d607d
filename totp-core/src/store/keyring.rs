//! Keyring-backed credential store
//!
//! Uses the platform keyring (Secret Service on Linux, Keychain on macOS,
//! Credential Manager on Windows) through the `keyring` crate. The OS may
//! prompt the user to unlock the keyring; the call blocks until it answers.

use keyring::Entry;
use tracing::debug;

use crate::error::StoreError;
use crate::store::CredentialStore;

/// Store backed by the system keyring
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(service_id: &str, account_id: &str) -> Result<Entry, StoreError> {
        Entry::new(service_id, account_id).map_err(|e| StoreError::Init {
            reason: e.to_string(),
        })
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, service_id: &str, account_id: &str) -> Result<Option<String>, StoreError> {
        let entry = Self::entry(service_id, account_id)?;

        match entry.get_password() {
            Ok(blob) => Ok(Some(blob)),
            Err(keyring::Error::NoEntry) => {
                debug!("No keyring entry for {}/{}", service_id, account_id);
                Ok(None)
            }
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn set(&self, service_id: &str, account_id: &str, blob: &str) -> Result<(), StoreError> {
        let entry = Self::entry(service_id, account_id)?;
        entry.set_password(blob).map_err(map_keyring_error)
    }

    fn name(&self) -> String {
        "system keyring".to_string()
    }
}

fn map_keyring_error(e: keyring::Error) -> StoreError {
    match e {
        keyring::Error::BadEncoding(_) => StoreError::Corrupt {
            reason: "keyring entry is not valid UTF-8".to_string(),
        },
        other => StoreError::Unavailable {
            reason: other.to_string(),
        },
    }
}
