//! External command execution
//!
//! Discovery occasionally needs an OS utility (the Windows registry query for
//! the documents folder). All such invocations go through [`run`] so they are
//! logged consistently, and through the [`CommandRunner`] trait so locators can
//! be exercised with canned output instead of a real utility.

use std::process::{Command, Output};
use std::time::Instant;

/// Runs an external command to completion and captures its output.
pub trait CommandRunner {
    fn run(&self, cmd: &mut Command) -> std::io::Result<Output>;
}

/// Runs commands on the host through [`run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &mut Command) -> std::io::Result<Output> {
        run(cmd)
    }
}

/// Execute a command with timing and debug logging.
///
/// ```text
/// $ reg query HKCU\Software\...\Shell Folders /v Personal
/// [sc2-trace] cmd="reg query ..." dur=12.3ms ok=true
/// ```
pub fn run(cmd: &mut Command) -> std::io::Result<Output> {
    let cmd_str = describe(cmd);
    log::debug!("$ {}", cmd_str);

    let t0 = Instant::now();
    let result = cmd.output();
    let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(output) => log::debug!(
            "[sc2-trace] cmd=\"{}\" dur={:.1}ms ok={}",
            cmd_str,
            duration_ms,
            output.status.success()
        ),
        Err(e) => log::debug!(
            "[sc2-trace] cmd=\"{}\" dur={:.1}ms err=\"{}\"",
            cmd_str,
            duration_ms,
            e
        ),
    }

    result
}

/// Render a command as a single line for logs.
pub fn describe(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
