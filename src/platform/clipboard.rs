//! Clipboard access through external copy programs

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use totp_core::config::ClipboardSettings;
use tracing::{debug, warn};

pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn copy(&self, text: &str) -> io::Result<()>;

    fn name(&self) -> String;
}

/// Copy programs in order of preference, with the environment variable that
/// must be set for each to work
const CANDIDATES: &[(&str, &[&str], Option<&str>)] = &[
    ("pbcopy", &[], None),
    ("wl-copy", &[], Some("WAYLAND_DISPLAY")),
    ("xclip", &["-selection", "clipboard"], Some("DISPLAY")),
    ("xsel", &["--clipboard", "--input"], Some("DISPLAY")),
    ("clip.exe", &[], None),
];

/// Pipes the text to a program's stdin
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Clipboard for CommandClipboard {
    fn copy(&self, text: &str) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {}", self.program.display(), status),
            ))
        }
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Used when no copy program is available
#[derive(Debug, Default, Clone, Copy)]
pub struct NullClipboard;

impl Clipboard for NullClipboard {
    fn copy(&self, _text: &str) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no clipboard program found (install wl-clipboard, xclip or xsel)",
        ))
    }

    fn name(&self) -> String {
        "none".to_string()
    }
}

/// Pick the configured copy program, or the first usable candidate on PATH
pub fn select_clipboard(settings: &ClipboardSettings) -> Box<dyn Clipboard> {
    if let Some((program, args)) = settings.command.as_ref().and_then(|c| c.split_first()) {
        return match which::which(program) {
            Ok(path) => {
                debug!("Using configured clipboard command {}", path.display());
                Box::new(CommandClipboard::new(path, args.to_vec()))
            }
            Err(e) => {
                warn!("Configured clipboard command {} not usable: {}", program, e);
                Box::new(NullClipboard)
            }
        };
    }

    for (program, args, required_env) in CANDIDATES {
        if let Some(var) = required_env {
            if std::env::var_os(var).is_none() {
                continue;
            }
        }
        if let Ok(path) = which::which(program) {
            debug!("Using clipboard program {}", path.display());
            return Box::new(CommandClipboard::new(
                path,
                args.iter().map(|a| a.to_string()).collect(),
            ));
        }
    }

    debug!("No clipboard program found");
    Box::new(NullClipboard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_clipboard_fails() {
        let err = NullClipboard.copy("123456").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(NullClipboard.name(), "none");
    }

    #[test]
    fn test_missing_configured_command_falls_back_to_null() {
        let settings = ClipboardSettings {
            command: Some(vec!["__no_such_clipboard_program__".to_string()]),
        };
        assert_eq!(select_clipboard(&settings).name(), "none");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_clipboard_pipes_text() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("clip.txt");

        let clipboard = CommandClipboard::new(
            "sh",
            vec![
                "-c".to_string(),
                format!("cat > '{}'", target.display()),
            ],
        );
        clipboard.copy("123456").expect("copy through sh failed");
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "123456");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_clipboard_reports_failure() {
        let clipboard = CommandClipboard::new("false", vec![]);
        assert!(clipboard.copy("123456").is_err());
    }
}
