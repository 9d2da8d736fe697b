//! Picking the newest installed build of the client.
//!
//! The launcher records whichever build it last ran, but installations keep
//! one folder per build under `Versions/`, e.g.
//! `StarCraft II/Versions/Base75689/SC2_x64.exe`. We prefer the newest folder
//! that actually contains the executable, so a half-removed newer build is
//! skipped rather than chosen.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const VERSIONS_DIR: &str = "Versions";

/// Return the path of `exe_path`'s executable inside the greatest version
/// folder that contains it, or `exe_path` unchanged.
///
/// Version folders are ranked by plain lexicographic order of their names.
/// Launcher folders are zero-padded (`Base69232`, `Base75689`) so this matches
/// numeric order for them; dotted names like `1.9` and `1.10` do not.
pub fn resolve_latest_version(exe_path: &Path) -> PathBuf {
    let (Some(dir), Some(exe)) = (exe_path.parent(), exe_path.file_name()) else {
        return exe_path.to_path_buf();
    };

    let Some(versions) = find_versions_dir(dir) else {
        log::debug!(
            "No {VERSIONS_DIR} directory above {}; keeping it",
            exe_path.display()
        );
        return exe_path.to_path_buf();
    };

    let found = version_dirs(versions)
        .iter()
        .rev()
        .map(|candidate| versions.join(candidate).join(exe))
        .find(|path| path.is_file());

    match found {
        Some(path) => {
            if path != exe_path {
                log::debug!(
                    "Using {} instead of {}",
                    path.display(),
                    exe_path.display()
                );
            }
            path
        }
        None => {
            log::debug!(
                "No version folder under {} contains {}",
                versions.display(),
                exe.to_string_lossy()
            );
            exe_path.to_path_buf()
        }
    }
}

/// Nearest ancestor (including `dir` itself) named `Versions`.
fn find_versions_dir(dir: &Path) -> Option<&Path> {
    dir.ancestors()
        .find(|ancestor| ancestor.file_name().is_some_and(|name| name == VERSIONS_DIR))
}

/// Names of the immediate subdirectories, sorted ascending.
///
/// An unreadable directory yields no candidates.
fn version_dirs(versions: &Path) -> Vec<OsString> {
    let entries = match std::fs::read_dir(versions) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot list {}: {e}", versions.display());
            return Vec::new();
        }
    };
    let mut dirs: Vec<OsString> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| entry.file_name())
        .collect();
    dirs.sort();
    dirs
}
