//! Credential store adapters
//!
//! Uniform get/set access to whatever secure storage is available, addressed
//! by a (service identifier, account identifier) pair. Each address holds a
//! single opaque string.
//!
//! There is no locking between processes: two writers racing on the same
//! address leave whichever value was set last.

use std::path::PathBuf;

use crate::config::{Settings, StoreBackend};
use crate::error::StoreError;

pub mod file;
pub mod keyring;
pub mod memory;

pub use self::file::FileStore;
pub use self::keyring::KeyringStore;
pub use self::memory::MemoryStore;

/// Secure storage for a single blob per (service, account) pair.
pub trait CredentialStore {
    /// Fetch the stored blob.
    ///
    /// A missing entry is `Ok(None)`, never an error.
    fn get(&self, service_id: &str, account_id: &str) -> Result<Option<String>, StoreError>;

    /// Create or overwrite the stored blob.
    ///
    /// Readers observe either the previous value or `blob`, never a mix.
    fn set(&self, service_id: &str, account_id: &str, blob: &str) -> Result<(), StoreError>;

    /// Human-readable backend name for diagnostics.
    fn name(&self) -> String;
}

/// Build the backend selected in `settings`.
pub fn from_settings(settings: &Settings) -> Result<Box<dyn CredentialStore>, StoreError> {
    match settings.store.backend {
        StoreBackend::Keyring => Ok(Box::new(KeyringStore::new())),
        StoreBackend::File => {
            let path: PathBuf = settings.store.path.clone().ok_or_else(|| StoreError::Init {
                reason: "file backend selected without a path".to_string(),
            })?;
            Ok(Box::new(FileStore::new(path)))
        }
    }
}
