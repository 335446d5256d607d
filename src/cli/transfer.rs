//! Import and export commands
//!
//! Both ask for confirmation first: import overwrites services with the same
//! name and export writes every secret to disk in plain text.

use std::io::{BufRead, Write};
use std::path::Path;

use totp_core::error::CoreError;
use totp_core::manager::CredentialManager;

use crate::cli::console::Console;

pub fn run_import<R: BufRead, W: Write>(
    manager: &mut CredentialManager,
    console: &mut Console<R, W>,
    path: &Path,
) -> Result<bool, CoreError> {
    let question = format!(
        "Warning: You are about to import all TOTP credentials from {}. \n\
         Existing entries that have the same name as imported entries will be overwritten without warning.\n\
         Do you want to continue?",
        path.display()
    );
    if !console.confirm(&question)? {
        console.line("Not performing import.")?;
        return Ok(false);
    }

    if manager.import_creds_from_file(path)? {
        console.line("Successfully imported credentials.")?;
        Ok(true)
    } else {
        console.line("Import failed. See above for a detailed error.")?;
        Ok(false)
    }
}

pub fn run_export<R: BufRead, W: Write>(
    manager: &CredentialManager,
    console: &mut Console<R, W>,
    path: &Path,
) -> Result<bool, CoreError> {
    let question = format!(
        "Warning: You are about to export all TOTP credentials in PLAIN TEXT from your current keyring to {}.\n\
         Do you want to continue?",
        path.display()
    );
    if !console.confirm(&question)? {
        console.line("Not performing export.")?;
        return Ok(false);
    }

    manager.export_creds_to_file(path)?;
    console.line(&format!(
        "Successfully exported credentials to {}",
        path.display()
    ))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use totp_core::store::MemoryStore;

    fn manager() -> CredentialManager {
        let mut manager =
            CredentialManager::new(Box::new(MemoryStore::new()), "__cli_test__").unwrap();
        manager.add_service("svc_1", "MFRGGZDFMZTWQ2LP").unwrap();
        manager
    }

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_export_declined_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.json");
        let mut console = console("n\n");

        assert!(!run_export(&manager(), &mut console, &path).unwrap());
        assert!(!path.exists());
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("PLAIN TEXT"));
        assert!(output.contains("Not performing export."));
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.json");

        assert!(run_export(&manager(), &mut console("yes\n"), &path).unwrap());
        assert!(path.exists());

        let mut fresh =
            CredentialManager::new(Box::new(MemoryStore::new()), "__cli_test__").unwrap();
        assert!(run_import(&mut fresh, &mut console("y\n"), &path).unwrap());
        assert_eq!(fresh.get_services(), vec!["svc_1"]);
    }

    #[test]
    fn test_import_declined() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("in.json");
        std::fs::write(&path, r#"{"svc_2": {"code": "GEZDGNBVGY3TQOJQ"}}"#).unwrap();

        let mut manager = manager();
        assert!(!run_import(&mut manager, &mut console("no\n"), &path).unwrap());
        assert_eq!(manager.get_services(), vec!["svc_1"]);
    }

    #[test]
    fn test_import_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("in.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut manager = manager();
        let mut console = console("y\n");
        assert!(!run_import(&mut manager, &mut console, &path).unwrap());
        assert!(String::from_utf8(console.into_output())
            .unwrap()
            .contains("Import failed"));
    }
}
