// Helpers go unused on platforms where the integration tests are compiled out.
#![allow(dead_code)]

//! # Test utilities for sc2-runner
//!
//! Each test gets its own temporary `HOME`, which doubles as the documents
//! directory on Unix, so the launcher metadata and fake installations never
//! touch the real user account.

use insta_cmd::get_cargo_bin;
use rstest::fixture;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

#[fixture]
pub fn temp_home() -> TempDir {
    TempDir::new().unwrap()
}

/// An `sc2-runner` invocation isolated to `home`.
pub fn sc2_command(home: &Path) -> Command {
    let mut cmd = Command::new(get_cargo_bin("sc2-runner"));
    cmd.env("HOME", home);
    cmd.env("USERPROFILE", home);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `<home>/Starcraft II/ExecuteInfo.txt`.
pub fn write_execute_info(home: &Path, content: &str) -> PathBuf {
    let dir = home.join("Starcraft II");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("ExecuteInfo.txt");
    fs::write(&path, content).unwrap();
    path
}

/// Create `<root>/StarCraft II/Versions/<build>/<exe>` for each build listed in
/// `with_exe`, and an empty folder for the rest. Returns the `Versions` path.
pub fn fake_install(root: &Path, builds: &[&str], with_exe: &[&str], exe: &str) -> PathBuf {
    let versions = root.join("StarCraft II").join("Versions");
    for build in builds {
        let dir = versions.join(build);
        fs::create_dir_all(&dir).unwrap();
        if with_exe.contains(build) {
            fs::write(dir.join(exe), b"").unwrap();
        }
    }
    versions
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
