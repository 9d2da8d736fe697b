//! Finding the launcher's `ExecuteInfo.txt`.
//!
//! The launcher writes its metadata under the user's documents folder
//! (`<documents>/Starcraft II/ExecuteInfo.txt`). Each platform finds that folder
//! differently, so each gets its own [`DocumentsLocator`].

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ResolveError;
use crate::shell_exec::{CommandRunner, SystemRunner};

/// Location of the metadata file relative to the documents directory.
pub const EXECUTE_INFO_RELATIVE: [&str; 2] = ["Starcraft II", "ExecuteInfo.txt"];

const SHELL_FOLDERS_KEY: &str =
    r"HKCU\Software\Microsoft\Windows\CurrentVersion\Explorer\Shell Folders";

/// Column where the value starts on the `reg query` output line.
const REG_VALUE_OFFSET: usize = "    Personal    REG_SZ    ".len();

/// Finds the directory the launcher treats as "My Documents".
pub trait DocumentsLocator {
    fn documents_dir(&self) -> Result<PathBuf, ResolveError>;
}

/// Host platforms with distinct documents-directory lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Unix => "Unix",
        }
    }

    /// The locator for this platform, running utilities on the real host.
    pub fn locator(self) -> Box<dyn DocumentsLocator> {
        match self {
            Platform::Windows => Box::new(WindowsLocator::new(SystemRunner)),
            Platform::MacOs => Box::new(MacLocator),
            Platform::Unix => Box::new(UnixLocator::default()),
        }
    }
}

/// Join the documents directory with the metadata file's relative location.
///
/// Pure path composition; the file is not checked for existence.
pub fn execute_info_path(documents: &Path) -> PathBuf {
    EXECUTE_INFO_RELATIVE
        .iter()
        .fold(documents.to_path_buf(), |path, part| path.join(part))
}

/// Reads the `Personal` shell folder out of the registry via `reg query`.
#[derive(Debug, Clone)]
pub struct WindowsLocator<R> {
    runner: R,
}

impl<R: CommandRunner> WindowsLocator<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> DocumentsLocator for WindowsLocator<R> {
    fn documents_dir(&self) -> Result<PathBuf, ResolveError> {
        let mut cmd = Command::new("reg");
        cmd.args(["query", SHELL_FOLDERS_KEY, "/v", "Personal"]);

        let output = self.runner.run(&mut cmd).map_err(|e| {
            log::warn!("Documents directory lookup failed: {e}");
            ResolveError::LookupFailed {
                message: "Documents directory lookup failed".into(),
                output: Some(e.to_string()),
            }
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let captured = combined.trim();

        if !output.status.success() {
            log::warn!("Documents directory lookup failed: {captured}");
            return Err(ResolveError::LookupFailed {
                message: "Documents directory lookup failed".into(),
                output: Some(captured.to_string()),
            });
        }

        parse_reg_query_value(captured).map(PathBuf::from).ok_or_else(|| {
            log::warn!("Unexpected output from registry query: {captured}");
            ResolveError::LookupFailed {
                message: "Unexpected output from registry query".into(),
                output: Some(captured.to_string()),
            }
        })
    }
}

/// Pull the value out of trimmed `reg query ... /v Personal` output.
///
/// The first line names the key; the second holds
/// `    Personal    REG_SZ    <value>`.
fn parse_reg_query_value(output: &str) -> Option<&str> {
    let line = output.lines().nth(1)?;
    if !line.trim_start().starts_with("Personal") {
        return None;
    }
    let value = line.get(REG_VALUE_OFFSET..)?.trim_end();
    (!value.is_empty()).then_some(value)
}

/// No documents lookup exists for macOS yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacLocator;

impl DocumentsLocator for MacLocator {
    fn documents_dir(&self) -> Result<PathBuf, ResolveError> {
        Err(ResolveError::PlatformUnsupported {
            platform: Platform::MacOs.name(),
        })
    }
}

/// Uses the current user's home directory.
///
/// The default lookup is [`crate::path::home_dir`]: `$HOME` when set, and the
/// passwd entry of the current user otherwise. Honouring `$HOME` first lets a
/// process (or a test) point discovery at a different documents directory.
#[derive(Debug, Clone, Copy)]
pub struct UnixLocator {
    lookup: fn() -> Option<PathBuf>,
}

impl UnixLocator {
    /// Build a locator with a custom home lookup (tests use this to simulate
    /// an account without a home directory).
    pub fn with_lookup(lookup: fn() -> Option<PathBuf>) -> Self {
        Self { lookup }
    }
}

impl Default for UnixLocator {
    fn default() -> Self {
        Self::with_lookup(crate::path::home_dir)
    }
}

impl DocumentsLocator for UnixLocator {
    fn documents_dir(&self) -> Result<PathBuf, ResolveError> {
        (self.lookup)().ok_or_else(|| ResolveError::LookupFailed {
            message: "Could not determine the current user's home directory".into(),
            output: None,
        })
    }
}
