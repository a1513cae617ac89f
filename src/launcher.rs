// Open files with the OS default application
//
// Resolution order for the opener command:
// 1) REELPICK_OPENER environment variable (program plus optional args, whitespace separated)
// 2) Platform default: `open` (macOS), `cmd /C start ""` (Windows), `xdg-open` (others)

use std::cell::RefCell;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants::ENV_OPENER;
use crate::error::{ReelPickError, Result};

pub trait Launcher {
    fn open(&self, path: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SystemLauncher {
    program: String,
    args: Vec<String>,
}

impl SystemLauncher {
    pub fn new() -> Self {
        let mut parts = resolve_opener();
        let program = parts.remove(0);
        Self { program, args: parts }
    }

    pub fn with_command(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ReelPickError::Launch(format!("File not found: {}", path.display())));
        }

        log::debug!("Launching {} {:?} {}", self.program, self.args, path.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| ReelPickError::Launch(format!("Failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(ReelPickError::Launch(format!(
                "{} exited with {} for {}",
                self.program,
                status,
                path.display()
            )));
        }

        Ok(())
    }
}

/// Never returns an empty vec
fn resolve_opener() -> Vec<String> {
    if let Ok(v) = env::var(ENV_OPENER) {
        let parts: Vec<String> = v.split_whitespace().map(String::from).collect();
        if !parts.is_empty() {
            return parts;
        }
    }

    default_opener().iter().map(|s| s.to_string()).collect()
}

fn default_opener() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &["open"]
    }
    #[cfg(target_os = "windows")]
    {
        // Empty title argument so `start` doesn't treat a quoted path as the window title
        &["cmd", "/C", "start", ""]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &["xdg-open"]
    }
}

/// Launcher that only remembers what it was asked to open
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    opened: RefCell<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every open() call fails (after being recorded)
    pub fn failing() -> Self {
        Self { opened: RefCell::new(Vec::new()), fail: true }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        if self.fail {
            return Err(ReelPickError::Launch(format!("Refused to open {}", path.display())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opener_is_not_empty() {
        assert!(!default_opener().is_empty());
        assert!(!SystemLauncher::new().program.is_empty());
    }

    #[test]
    fn test_missing_file_is_launch_error() {
        let launcher = SystemLauncher::with_command("true", &[]);
        let err = launcher.open(Path::new("/definitely/not/here.mp4")).unwrap_err();
        assert!(matches!(err, ReelPickError::Launch(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("clip.mp4");
        std::fs::write(&file, b"x").unwrap();

        assert!(SystemLauncher::with_command("true", &[]).open(&file).is_ok());

        let err = SystemLauncher::with_command("false", &[]).open(&file).unwrap_err();
        assert!(matches!(err, ReelPickError::Launch(_)));
    }

    #[test]
    fn test_recording_launcher() {
        let launcher = RecordingLauncher::new();
        launcher.open(Path::new("/a.mp4")).unwrap();
        assert_eq!(launcher.opened(), vec![PathBuf::from("/a.mp4")]);

        let failing = RecordingLauncher::failing();
        assert!(failing.open(Path::new("/b.mp4")).is_err());
        assert_eq!(failing.opened().len(), 1);
    }
}
