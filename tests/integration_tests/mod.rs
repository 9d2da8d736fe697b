// The binary locates ExecuteInfo.txt through $HOME only on non-macOS Unix;
// Windows asks the registry and macOS has no lookup.
#![cfg(all(unix, not(target_os = "macos")))]

pub mod resolve;
