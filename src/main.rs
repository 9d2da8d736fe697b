use std::io::Write;
use std::process;

use anyhow::Context;
use clap::{Arg, Command};
use sc2_runner::{ConfigResolver, ResolvedSettings, maps};

fn cli() -> Command {
    Command::new("sc2-runner")
        .about("Resolve the settings used to launch StarCraft II")
        .long_about(
            "Reads the launcher's ExecuteInfo.txt, picks the newest installed build, \
             and applies command-line overrides.",
        )
        .version(env!("CARGO_PKG_VERSION"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut resolver = ConfigResolver::for_current_platform(cli());
    resolver.register(
        Arg::new("format")
            .long("format")
            .value_name("FORMAT")
            .value_parser(["text", "json"])
            .default_value("text")
            .help("Output format for the resolved settings"),
    );

    if !resolver.load().unwrap_or_else(|e| e.exit()) {
        process::exit(1);
    }

    if let Err(e) = print_settings(&resolver) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_settings(resolver: &ConfigResolver) -> anyhow::Result<()> {
    let settings = resolver
        .ready_settings()
        .context("Settings were not resolved")?;
    let format = resolver
        .matches()
        .and_then(|matches| matches.get_one::<String>("format"))
        .map_or("text", String::as_str);

    let mut stdout = std::io::stdout().lock();
    match format {
        "json" => {
            serde_json::to_writer_pretty(&mut stdout, settings)
                .context("Failed to serialize settings")?;
            writeln!(stdout)?;
        }
        _ => write_text(&mut stdout, settings)?,
    }
    Ok(())
}

fn write_text(out: &mut impl Write, settings: &ResolvedSettings) -> std::io::Result<()> {
    writeln!(out, "executable: {}", settings.process_path.display())?;
    writeln!(out, "realtime:   {}", settings.realtime)?;
    match settings.port_start {
        Some(port) => writeln!(out, "port:       {port}")?,
        None => writeln!(out, "port:       none")?,
    }
    match &settings.map_name {
        Some(map) => writeln!(out, "map:        {map}")?,
        None => writeln!(out, "map:        {} (random)", maps::random_1v1_map())?,
    }
    match settings.timeout_ms {
        Some(timeout) => writeln!(out, "timeout:    {timeout}ms")?,
        None => writeln!(out, "timeout:    none")?,
    }

    if !settings.diagnostics.is_empty() {
        writeln!(out, "\nnotes:")?;
        for diagnostic in &settings.diagnostics {
            writeln!(out, "  {diagnostic}")?;
        }
    }
    Ok(())
}
