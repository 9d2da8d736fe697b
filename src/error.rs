//! Errors produced while discovering and reconciling settings.
//!
//! Only [`ResolveError::ConfigurationIncomplete`] is meant to reach the user.
//! Everything else is recorded as a [`crate::settings::Diagnostic`] and the
//! affected value is treated as absent.

use std::path::PathBuf;

use crate::path::format_path_for_display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The metadata file (or another expected file) could not be opened.
    NotFound { path: PathBuf, error: String },
    /// A value was present but could not be read as the expected number.
    ParseFailure { key: String, value: String },
    /// The OS-level directory or user lookup failed.
    LookupFailed {
        message: String,
        /// Captured output of the lookup utility, when there was one
        output: Option<String>,
    },
    /// No documents-directory lookup exists for this platform.
    PlatformUnsupported { platform: &'static str },
    /// No usable executable path after every resolution step.
    ConfigurationIncomplete,
}

impl std::error::Error for ResolveError {}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::NotFound { path, error } => {
                write!(
                    f,
                    "Cannot open {}: {error}",
                    format_path_for_display(path)
                )
            }
            ResolveError::ParseFailure { key, value } => {
                write!(f, "Value for '{key}' is not a valid number: {value:?}")
            }
            ResolveError::LookupFailed { message, output } => match output {
                Some(output) if !output.is_empty() => write!(f, "{message}: {output}"),
                _ => write!(f, "{message}"),
            },
            ResolveError::PlatformUnsupported { platform } => {
                write!(f, "Locating the documents directory is not supported on {platform}")
            }
            ResolveError::ConfigurationIncomplete => {
                write!(
                    f,
                    "Please run StarCraft II at least once before using this configuration loader"
                )
            }
        }
    }
}
