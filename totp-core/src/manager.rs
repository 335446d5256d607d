//! Credential manager
//!
//! Owns the in-memory credential set for one OS user, keeps it in sync with
//! the credential store and generates codes from it.
//!
//! Every mutation is persisted immediately. There is no rollback: if the
//! store write fails the in-memory set keeps the change and the error is
//! returned, so the two differ until the next successful write.

use std::io::Write;
use std::path::Path;

use tracing::{debug, error, warn};

use crate::config::Settings;
use crate::error::{CoreError, Result, StoreError};
use crate::otp::totp::{self, Clock, SystemClock};
use crate::store::{self, CredentialStore};
use crate::types::{CredentialSet, OtpSecret, ServiceRecord, TotpToken, STORE_SERVICE_ID};
use crate::user::current_user;

pub struct CredentialManager {
    store: Box<dyn CredentialStore>,
    clock: Box<dyn Clock>,
    user: String,
    creds: CredentialSet,
}

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("store", &self.store.name())
            .field("user", &self.user)
            .field("services", &self.creds.len())
            .finish()
    }
}

impl CredentialManager {
    /// Open the credential set of the current OS user in the store selected
    /// by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store = store::from_settings(settings)?;
        let user = current_user()?;
        Self::new(store, user)
    }

    /// Open the credential set of `user` in `store`, using the wall clock.
    pub fn new(store: Box<dyn CredentialStore>, user: impl Into<String>) -> Result<Self> {
        Self::with_clock(store, user, Box::new(SystemClock))
    }

    /// Open the credential set of `user` in `store` with an explicit clock.
    ///
    /// A user with no stored entry starts with an empty set.
    pub fn with_clock(
        store: Box<dyn CredentialStore>,
        user: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let mut manager = Self {
            store,
            clock,
            user: user.into(),
            creds: CredentialSet::new(),
        };

        debug!(
            "Using credential store '{}' for user '{}'",
            manager.store.name(),
            manager.user
        );

        manager.creds = manager.load_creds(true)?.unwrap_or_default();
        Ok(manager)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn store_name(&self) -> String {
        self.store.name()
    }

    /// Read-only view of the in-memory credential set
    pub fn creds(&self) -> &CredentialSet {
        &self.creds
    }

    /// Fetch and parse the persisted credential set.
    ///
    /// With no stored entry this returns an empty set when `init_new` is
    /// true and `None` otherwise, so callers can tell "never initialized"
    /// apart from "initialized but empty". A blob that does not parse is an
    /// error.
    pub fn load_creds(&self, init_new: bool) -> Result<Option<CredentialSet>> {
        let blob = self.store.get(STORE_SERVICE_ID, &self.user)?;

        let blob = match blob {
            Some(blob) if !blob.is_empty() => blob,
            _ if init_new => {
                debug!("No stored credentials, starting with an empty set");
                return Ok(Some(CredentialSet::new()));
            }
            _ => return Ok(None),
        };

        let creds: CredentialSet = serde_json::from_str(&blob).map_err(|e| StoreError::Corrupt {
            reason: e.to_string(),
        })?;
        debug!("Loaded {} service(s) from the credential store", creds.len());
        Ok(Some(creds))
    }

    fn save_creds(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.creds)?;
        self.store.set(STORE_SERVICE_ID, &self.user, &blob)?;
        debug!("Saved {} service(s) to the credential store", self.creds.len());
        Ok(())
    }

    /// Add a new service.
    ///
    /// Never overwrites: an existing `name` is refused with `Ok(false)`.
    /// The secret is stored as given and only checked when a code is
    /// generated from it.
    pub fn add_service(&mut self, name: &str, secret: &str) -> Result<bool> {
        if self.creds.contains_key(name) {
            error!(
                "There is already a service with the name {}. Use the edit option to update this service.",
                name
            );
            return Ok(false);
        }

        self.creds
            .insert(name.to_string(), ServiceRecord::new(secret.to_string()));
        self.save_creds()?;
        Ok(true)
    }

    /// Rename a service and/or replace its secret.
    ///
    /// `old_name` must exist. Renaming onto another existing service is
    /// refused, as is an edit that changes nothing (no new name or secret,
    /// or only a "rename" to the current name). Other fields of the record
    /// survive a rename.
    pub fn edit_service(
        &mut self,
        old_name: &str,
        new_name: Option<&str>,
        secret: Option<&str>,
    ) -> Result<bool> {
        if !self.creds.contains_key(old_name) {
            return Err(CoreError::ServiceNotFound {
                name: old_name.to_string(),
            });
        }

        let new_name = new_name.filter(|name| !name.is_empty() && *name != old_name);
        let secret = secret.filter(|secret| !secret.is_empty());

        if let Some(name) = new_name {
            if self.creds.contains_key(name) {
                error!("There is already a service with the name {}.", name);
                return Ok(false);
            }
        }

        if new_name.is_none() && secret.is_none() {
            warn!("You provided no changes. Leaving service as-is.");
            return Ok(false);
        }

        if let Some(secret) = secret {
            if let Some(record) = self.creds.get_mut(old_name) {
                record.code = OtpSecret::from(secret);
            }
        }

        if let Some(name) = new_name {
            if let Some(record) = self.creds.remove(old_name) {
                self.creds.insert(name.to_string(), record);
            }
        }

        self.save_creds()?;
        Ok(true)
    }

    /// Remove a service. Removing an absent name is not an error.
    pub fn rm_service(&mut self, name: &str) -> Result<bool> {
        if self.creds.remove(name).is_none() {
            debug!("Service {} was not present", name);
        }
        self.save_creds()?;
        Ok(true)
    }

    /// All service names in ascending lexicographic order
    pub fn get_services(&self) -> Vec<String> {
        self.creds.keys().cloned().collect()
    }

    /// Generate the current code for `service`
    pub fn get_totp_code(&self, service: &str) -> Result<TotpToken> {
        let now = self.clock.now()?;
        self.get_totp_code_at(service, now)
    }

    /// Generate the code for `service` at a given Unix timestamp
    pub fn get_totp_code_at(&self, service: &str, timestamp: u64) -> Result<TotpToken> {
        let record = self
            .creds
            .get(service)
            .ok_or_else(|| CoreError::ServiceNotFound {
                name: service.to_string(),
            })?;

        let token = totp::generate_totp(&record.code, timestamp)?;
        debug!(
            "Generated code for {}, valid for {}s",
            service,
            totp::seconds_remaining(timestamp)
        );
        Ok(token)
    }

    /// Merge credentials from a JSON export file.
    ///
    /// Imported services replace existing services of the same name; others
    /// are kept. The whole file is parsed before anything is merged, so an
    /// unreadable or invalid file leaves the set untouched and returns
    /// `Ok(false)`.
    pub fn import_creds_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let path = path.as_ref();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Error: opening dump file {}: {}", path.display(), e);
                return Ok(false);
            }
        };

        let imported: CredentialSet = match serde_json::from_str(&contents) {
            Ok(imported) => imported,
            Err(e) => {
                error!(
                    "Error: could not parse dump file. Ensure it is valid json: {}",
                    e
                );
                return Ok(false);
            }
        };

        debug!("Importing {} service(s) from {}", imported.len(), path.display());
        self.creds.extend(imported);
        self.save_creds()?;
        Ok(true)
    }

    /// Write every credential, in plain text, to a JSON file.
    ///
    /// The file is created or truncated and is readable by the owner only
    /// on Unix. Write failures are returned as I/O errors.
    pub fn export_creds_to_file<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        let contents = serde_json::to_string(&self.creds)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path.as_ref())?;

        // mode only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(contents.as_bytes())?;
        debug!(
            "Exported {} service(s) to {}",
            self.creds.len(),
            path.as_ref().display()
        );
        Ok(true)
    }
}
