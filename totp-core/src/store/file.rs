//! File-backed credential store
//!
//! Fallback for hosts without a usable keyring. Entries live in a single
//! JSON object keyed by `service:account`. The file is NOT encrypted; it is
//! only restricted to the owner on Unix.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::CredentialStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key(service_id: &str, account_id: &str) -> String {
        format!("{}:{}", service_id, account_id)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Credential file {:?} does not exist yet", self.path);
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(StoreError::Unavailable {
                    reason: format!("Failed to read {}: {}", self.path.display(), e),
                })
            }
        };

        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            reason: format!("{}: {}", self.path.display(), e),
        })
    }

    /// Replace the file contents by writing a sibling and renaming it over
    /// the target.
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let unavailable = |e: std::io::Error| StoreError::Unavailable {
            reason: format!("Failed to write {}: {}", self.path.display(), e),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(unavailable)?;
            }
        }

        let contents = serde_json::to_string(entries).map_err(|e| StoreError::Corrupt {
            reason: e.to_string(),
        })?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp_path).map_err(unavailable)?;
        let written = file
            .write_all(contents.as_bytes())
            .and_then(|()| file.sync_all());
        drop(file);
        let written = written.and_then(|()| fs::rename(&tmp_path, &self.path));

        if let Err(e) = written {
            // the temporary file holds a full cleartext copy
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!("Failed to remove {}: {}", tmp_path.display(), cleanup);
            }
            return Err(unavailable(e));
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, service_id: &str, account_id: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.read_all()?;
        Ok(entries.remove(&Self::key(service_id, account_id)))
    }

    fn set(&self, service_id: &str, account_id: &str, blob: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(Self::key(service_id, account_id), blob.to_string());
        self.write_all(&entries)
    }

    fn name(&self) -> String {
        format!("file ({})", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("creds.json"));
        assert_eq!(store.get("svc", "user").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_and_persists() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("creds.json");
        let store = FileStore::new(&path);

        store.set("svc", "user", "{\"a\":1}").expect("Failed to write store");

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("svc", "user").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(!path.with_file_name("creds.json.tmp").exists());
    }

    #[test]
    fn test_entries_are_independent() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("creds.json"));

        store.set("svc", "alice", "a").unwrap();
        store.set("svc", "bob", "b").unwrap();
        store.set("svc", "alice", "a2").unwrap();

        assert_eq!(store.get("svc", "alice").unwrap().as_deref(), Some("a2"));
        assert_eq!(store.get("svc", "bob").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_corrupt_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("creds.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("svc", "user"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_failed_write_removes_temporary_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("creds.json");
        // a non-empty directory cannot be replaced by a file
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let store = FileStore::new(&path);
        let mut entries = BTreeMap::new();
        entries.insert("svc:user".to_string(), "secret".to_string());

        assert!(matches!(
            store.write_all(&entries),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(!temp_dir.path().join("creds.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("creds.json");
        FileStore::new(&path).set("svc", "user", "x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
