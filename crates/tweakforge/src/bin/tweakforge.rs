use anyhow::bail;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tweakforge::Diagnostics;
use tweakforge::bundle::Bundle;
use tweakforge::configuration::Configuration;
use tweakforge::decode::decode_command;
use tweakforge::errors::TweakResult;
use tweakforge::limits::{MAX_COMMAND_LENGTH, MAX_SLOTS_PER_TYPE, PackLimits};
use tweakforge::mapping::ConfigurationMapping;
use tweakforge::sections::LobbyBuilder;

/// Build and inspect lobby tweak commands
#[derive(Parser)]
#[command(version)]
struct Opts {
    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    Build(Build),
    Decode(Decode),
}

/// Print the sections for a configuration, separated by blank lines
#[derive(Parser)]
struct Build {
    /// Directory holding the Lua bundle
    #[arg(long)]
    bundle: PathBuf,

    /// Mapping document; the built-in mapping is used if omitted
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Configuration document; every setting takes its default if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = MAX_COMMAND_LENGTH)]
    max_command_length: usize,

    #[arg(long, default_value_t = MAX_SLOTS_PER_TYPE)]
    max_slots: usize,

    /// Fail if the build produced any warnings
    #[arg(long)]
    strict: bool,
}

/// Decode slot commands read from stdin and print their Lua payloads
#[derive(Parser)]
struct Decode {}

fn build(opts: Build) -> TweakResult<()> {
    let loaded_mapping;
    let mapping = match &opts.mapping {
        Some(path) => {
            loaded_mapping = ConfigurationMapping::from_path(path)?;
            &loaded_mapping
        }
        None => ConfigurationMapping::builtin(),
    };

    let mut diag = Diagnostics::new();
    let configuration = match &opts.config {
        Some(path) => mapping.validate(&Configuration::from_path(path)?, &mut diag),
        None => mapping.defaults(),
    };
    let bundle = Bundle::from_dir(&opts.bundle)?;

    let limits = PackLimits {
        max_command_length: opts.max_command_length,
        max_slots_per_type: opts.max_slots,
    };
    let result = LobbyBuilder::new(mapping)
        .with_limits(limits)
        .build(&configuration, &bundle, &mut diag)?;

    if opts.strict && !diag.is_empty() {
        bail!("build produced {} warning(s)", diag.warnings().len());
    }

    let mut stdout = std::io::stdout().lock();
    for (i, section) in result.sections.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        writeln!(stdout, "{section}")?;
    }

    Ok(())
}

fn decode() -> TweakResult<()> {
    let mut stdout = std::io::stdout().lock();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match decode_command(&line)? {
            Some(slot) => {
                writeln!(stdout, "-- [{}]", slot.category.slot_name(slot.slot))?;
                writeln!(stdout, "{}", slot.payload)?;
            }
            None => writeln!(stdout, "-- literal: {line}")?,
        }
    }

    Ok(())
}

fn main() -> TweakResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    match opts.subcmd {
        SubCommand::Build(build_opts) => build(build_opts),
        SubCommand::Decode(_) => decode(),
    }
}
