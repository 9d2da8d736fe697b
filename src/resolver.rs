//! The resolution pass: metadata file, version correction, then command line.
//!
//! ```text
//! Uninitialized -> MetadataLoaded -> VersionCorrected -> FlagsRegistered -> Ready
//!                                                                        \-> ReadyFailed
//! ```
//!
//! Construction runs everything up to `FlagsRegistered`. Each command-line flag
//! is registered with the value discovered so far as its default, so whatever
//! the user passes on the command line wins and everything else keeps the
//! discovered value. Loading is a separate call so the embedding program can
//! add its own arguments in between.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{Arg, ArgMatches, Command, value_parser};

use crate::error::ResolveError;
use crate::locator::{DocumentsLocator, Platform, execute_info_path};
use crate::properties::PropertyReader;
use crate::settings::{Diagnostic, ResolvedSettings, Stage};
use crate::versions::resolve_latest_version;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Uninitialized,
    MetadataLoaded,
    VersionCorrected,
    FlagsRegistered,
    Ready,
    ReadyFailed,
}

/// Settings field a command-line flag writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProcessPath,
    Realtime,
    MapName,
    TimeoutMs,
}

/// Declarative registration of one command-line flag.
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub name: &'static str,
    pub field: Field,
    pub help: &'static str,
}

/// Flags exposed to the command line. The port is read from the metadata file
/// only.
pub const FLAG_SPECS: [FlagSpec; 4] = [
    FlagSpec {
        name: "executable",
        field: Field::ProcessPath,
        help: "The path to StarCraft II.",
    },
    FlagSpec {
        name: "realtime",
        field: Field::Realtime,
        help: "Whether to run StarCraft II in real time or not.",
    },
    FlagSpec {
        name: "map",
        field: Field::MapName,
        help: "Which map to run.",
    },
    FlagSpec {
        name: "timeout",
        field: Field::TimeoutMs,
        help: "Timeout for how long the library will block for a response.",
    },
];

/// Keys read from `ExecuteInfo.txt`.
mod keys {
    pub const EXECUTABLE: &str = "executable";
    pub const REALTIME: &str = "realtime";
    pub const PORT: &str = "port";
    pub const MAP: &str = "map";
    pub const TIMEOUT: &str = "timeout";
}

#[derive(Debug)]
pub struct ConfigResolver {
    settings: ResolvedSettings,
    command: Command,
    state: ResolutionState,
    matches: Option<ArgMatches>,
}

impl ConfigResolver {
    /// Discover settings using the host platform's documents directory.
    pub fn for_current_platform(command: Command) -> Self {
        Self::new(command, Platform::current().locator().as_ref())
    }

    /// Discover settings from `ExecuteInfo.txt` under `locator`'s documents
    /// directory and register the flags on `command`.
    ///
    /// Never fails: discovery errors are kept in
    /// [`ResolvedSettings::diagnostics`] and leave the affected values unset.
    pub fn new(command: Command, locator: &dyn DocumentsLocator) -> Self {
        let mut resolver = Self::uninitialized(command);
        let metadata_path = match locator.documents_dir() {
            Ok(documents) => Some(execute_info_path(&documents)),
            Err(error) => {
                resolver.record(Stage::Locate, error);
                None
            }
        };
        resolver.discover(metadata_path.as_deref());
        resolver
    }

    /// Like [`ConfigResolver::new`], reading the metadata from `path` directly.
    pub fn with_metadata_path(command: Command, path: &Path) -> Self {
        let mut resolver = Self::uninitialized(command);
        resolver.discover(Some(path));
        resolver
    }

    fn uninitialized(command: Command) -> Self {
        Self {
            settings: ResolvedSettings::default(),
            command,
            state: ResolutionState::Uninitialized,
            matches: None,
        }
    }

    fn discover(&mut self, metadata_path: Option<&Path>) {
        if let Some(path) = metadata_path {
            match PropertyReader::open(path) {
                Ok(props) => self.apply_metadata(&props),
                Err(error) => self.record(Stage::ReadMetadata, error),
            }
        }
        self.advance(ResolutionState::MetadataLoaded);

        if self.settings.has_process_path() {
            self.settings.process_path = resolve_latest_version(&self.settings.process_path);
        }
        self.advance(ResolutionState::VersionCorrected);

        self.command = register_flags(std::mem::take(&mut self.command), &self.settings);
        self.advance(ResolutionState::FlagsRegistered);
    }

    fn apply_metadata(&mut self, props: &PropertyReader) {
        if let Some(executable) = props.get_string(keys::EXECUTABLE) {
            self.settings.process_path = PathBuf::from(executable);
        }
        if let Some(realtime) = self.int_field::<i64>(props, keys::REALTIME)
            && realtime != 0
        {
            self.settings.realtime = true;
        }
        self.settings.port_start = self.int_field(props, keys::PORT);
        self.settings.map_name = props
            .get_string(keys::MAP)
            .filter(|map| !map.is_empty())
            .map(str::to_string);
        self.settings.timeout_ms = self.int_field(props, keys::TIMEOUT);
    }

    /// Read an integer key, recording malformed or out-of-range values.
    fn int_field<T: TryFrom<i64>>(&mut self, props: &PropertyReader, key: &str) -> Option<T> {
        let value = match props.get_int_checked(key) {
            Ok(value) => value?,
            Err(error) => {
                self.record(Stage::ReadMetadata, error);
                return None;
            }
        };
        match T::try_from(value) {
            Ok(value) => Some(value),
            Err(_) => {
                self.record(
                    Stage::ReadMetadata,
                    ResolveError::ParseFailure {
                        key: key.to_string(),
                        value: value.to_string(),
                    },
                );
                None
            }
        }
    }

    fn record(&mut self, stage: Stage, error: ResolveError) {
        let diagnostic = Diagnostic { stage, error };
        match diagnostic.error {
            ResolveError::ParseFailure { .. } => log::warn!("{diagnostic}"),
            _ => log::debug!("{diagnostic}"),
        }
        self.settings.diagnostics.push(diagnostic);
    }

    fn advance(&mut self, next: ResolutionState) {
        log::debug!("Settings resolution: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Register an additional argument owned by the embedding program.
    ///
    /// Only takes effect before the first load.
    pub fn register(&mut self, arg: Arg) {
        if self.state != ResolutionState::FlagsRegistered {
            log::warn!("Ignoring argument '{}' registered after load", arg.get_id());
            return;
        }
        self.command = std::mem::take(&mut self.command).arg(arg);
    }

    /// Replace the default of one of the [`FLAG_SPECS`] flags before load.
    ///
    /// A value given on the command line still takes precedence. Values are
    /// validated when the command line is parsed.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if self.state != ResolutionState::FlagsRegistered {
            log::warn!("Ignoring set of '{name}' after load");
            return;
        }
        let Some(spec) = FLAG_SPECS.iter().find(|spec| spec.name == name) else {
            log::warn!("No flag named '{name}'");
            return;
        };
        let value = value.into();
        self.command =
            std::mem::take(&mut self.command).mut_arg(spec.name, |arg| arg.default_value(value));
    }

    /// Parse the process's command line, reporting failure on stderr.
    pub fn load(&mut self) -> Result<bool, clap::Error> {
        self.load_from(std::env::args_os(), &mut std::io::stderr())
    }

    /// Parse `args` (including the program name) and finish resolution.
    ///
    /// The [`FLAG_SPECS`] flags are accepted with one dash as well as two
    /// (`-executable=/b/y.exe`, `-realtime`).
    ///
    /// Returns `Ok(false)` when no executable path could be resolved, after
    /// writing guidance and the help text to `out`. The first outcome is
    /// final: later calls return it without parsing again. Argument errors are
    /// returned for the caller to report (typically via [`clap::Error::exit`]).
    pub fn load_from<I, T>(&mut self, args: I, out: &mut impl Write) -> Result<bool, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.state {
            ResolutionState::Ready => return Ok(true),
            ResolutionState::ReadyFailed => return Ok(false),
            _ => {}
        }

        let matches = self.command.try_get_matches_from_mut(normalize_flag_dashes(args))?;
        apply_matches(&mut self.settings, &matches);
        self.matches = Some(matches);

        if !self.settings.has_process_path() {
            self.advance(ResolutionState::ReadyFailed);
            // Ignore write errors; the return value carries the outcome
            let _ = writeln!(out, "{}", ResolveError::ConfigurationIncomplete);
            let _ = write!(out, "{}", self.command.render_help());
            return Ok(false);
        }

        log::debug!("Using {}", self.settings.process_path.display());
        self.advance(ResolutionState::Ready);
        Ok(true)
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    /// Current values, whatever the state of resolution.
    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    /// The settings, once resolution has succeeded.
    pub fn ready_settings(&self) -> Option<&ResolvedSettings> {
        (self.state == ResolutionState::Ready).then_some(&self.settings)
    }

    /// Parsed arguments, including any the embedding program registered.
    pub fn matches(&self) -> Option<&ArgMatches> {
        self.matches.as_ref()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

/// Rewrite `-name` and `-name=value` into `--name` forms for the
/// [`FLAG_SPECS`] flags. The program name and anything after `--` are left alone.
fn normalize_flag_dashes<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_terminator = false;
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let arg: OsString = arg.into();
            if index == 0 || after_terminator {
                return arg;
            }
            if arg == "--" {
                after_terminator = true;
                return arg;
            }
            let Some(rest) = arg.to_str().and_then(|s| s.strip_prefix('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if FLAG_SPECS.iter().any(|spec| spec.name == name) {
                let mut long = OsString::from("-");
                long.push(&arg);
                long
            } else {
                arg
            }
        })
        .collect()
}

fn register_flags(command: Command, settings: &ResolvedSettings) -> Command {
    // Repeating a flag keeps the last value
    let mut command = command.args_override_self(true);
    for spec in FLAG_SPECS {
        let arg = Arg::new(spec.name).long(spec.name).help(spec.help);
        let arg = match spec.field {
            Field::ProcessPath => {
                let arg = arg.value_name("PATH").value_parser(value_parser!(PathBuf));
                if settings.has_process_path() {
                    arg.default_value(settings.process_path.clone().into_os_string())
                } else {
                    arg
                }
            }
            Field::Realtime => arg
                .value_name("BOOL")
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .default_value(if settings.realtime { "true" } else { "false" }),
            Field::MapName => {
                let arg = arg.value_name("NAME");
                match &settings.map_name {
                    Some(map) => arg.default_value(map.clone()),
                    None => arg,
                }
            }
            Field::TimeoutMs => {
                let arg = arg.value_name("MS").value_parser(value_parser!(u32));
                match settings.timeout_ms {
                    Some(timeout) => arg.default_value(timeout.to_string()),
                    None => arg,
                }
            }
        };
        command = command.arg(arg);
    }
    command
}

fn apply_matches(settings: &mut ResolvedSettings, matches: &ArgMatches) {
    for spec in FLAG_SPECS {
        if matches.value_source(spec.name) == Some(ValueSource::CommandLine) {
            log::debug!("--{} given on the command line", spec.name);
        }
        match spec.field {
            Field::ProcessPath => {
                if let Some(path) = matches.get_one::<PathBuf>(spec.name) {
                    settings.process_path = path.clone();
                }
            }
            Field::Realtime => {
                if let Some(realtime) = matches.get_one::<bool>(spec.name) {
                    settings.realtime = *realtime;
                }
            }
            Field::MapName => {
                if let Some(map) = matches.get_one::<String>(spec.name) {
                    settings.map_name = (!map.is_empty()).then(|| map.clone());
                }
            }
            Field::TimeoutMs => {
                if let Some(timeout) = matches.get_one::<u32>(spec.name) {
                    settings.timeout_ms = Some(*timeout);
                }
            }
        }
    }
}
