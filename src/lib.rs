//! Launch settings for a locally installed StarCraft II client.
//!
//! Settings are discovered from the launcher's `ExecuteInfo.txt`, corrected to
//! the newest installed build, and then overridden by command-line flags:
//!
//! ```no_run
//! use clap::Command;
//! use sc2_runner::ConfigResolver;
//!
//! let mut resolver = ConfigResolver::for_current_platform(Command::new("my-bot"));
//! if !resolver.load().unwrap_or_else(|e| e.exit()) {
//!     std::process::exit(1);
//! }
//! let settings = resolver.ready_settings().unwrap();
//! println!("launching {}", settings.process_path.display());
//! ```

pub mod error;
pub mod locator;
pub mod maps;
pub mod path;
pub mod properties;
pub mod resolver;
pub mod settings;
pub mod shell_exec;
pub mod versions;

pub use error::ResolveError;
pub use resolver::{ConfigResolver, ResolutionState};
pub use settings::ResolvedSettings;
