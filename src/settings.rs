//! The reconciled launch settings.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ResolveError;

/// Settings consumed by whatever launches and drives the client.
///
/// Built once by [`crate::resolver::ConfigResolver`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedSettings {
    /// Path to the client executable; empty when nothing could be resolved
    pub process_path: PathBuf,
    pub realtime: bool,
    pub port_start: Option<u16>,
    /// Map name as written by the launcher (no `.SC2Map` suffix)
    pub map_name: Option<String>,
    pub timeout_ms: Option<u32>,
    /// Discovery errors that were swallowed while resolving
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedSettings {
    pub fn has_process_path(&self) -> bool {
        !self.process_path.as_os_str().is_empty()
    }
}

/// Step of the resolution pass that produced a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Locate,
    ReadMetadata,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Locate => "locate",
            Stage::ReadMetadata => "metadata",
        })
    }
}

/// A recovered error, kept so "defaulted" and "discovery broke" can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub error: ResolveError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.error)
    }
}
