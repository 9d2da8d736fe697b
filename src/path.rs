use std::path::{Path, PathBuf};

/// Get the current user's home directory.
///
/// Uses the `home` crate which handles platform-specific detection:
/// - Unix: `$HOME`, falling back to the passwd entry of the current user
/// - Windows: `USERPROFILE` or the shell's profile folder
pub fn home_dir() -> Option<PathBuf> {
    home::home_dir().filter(|home| !home.as_os_str().is_empty())
}

/// Format a filesystem path for diagnostics and log lines.
///
/// Replaces home directory prefix with `~` (e.g., `/home/alex/Starcraft II` -> `~/Starcraft II`).
/// Paths outside home are returned unchanged.
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }

        let mut display_path = PathBuf::from("~");
        display_path.push(stripped);
        return display_path.display().to_string();
    }

    path.display().to_string()
}
