//! In-memory credential store
//!
//! Provides a keyring replacement that never touches system storage. Clones
//! share the same map, so a test can hand one clone to a manager and inspect
//! what was persisted through another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::store::CredentialStore;

/// Generate a key for the in-memory map
fn make_key(service: &str, account: &str) -> String {
    format!("{}:{}", service, account)
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, service_id: &str, account_id: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Unavailable {
            reason: "in-memory store lock poisoned".to_string(),
        })?;
        Ok(entries.get(&make_key(service_id, account_id)).cloned())
    }

    fn set(&self, service_id: &str, account_id: &str, blob: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable {
            reason: "in-memory store lock poisoned".to_string(),
        })?;
        entries.insert(make_key(service_id, account_id), blob.to_string());
        Ok(())
    }

    fn name(&self) -> String {
        "in-memory".to_string()
    }
}
