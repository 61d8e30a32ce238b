//! neolo CLI
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use neolo::{Cli, Commands, commands};
use neolo_core::config::{Config, ConfigLoader, ConfigSources};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // arg_required_else_help: no subcommand means clap already printed help
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.as_deref())?;

    let log_dir = config.log_dir.as_ref().map(|d| d.as_std_path().to_path_buf());
    let obs = observability::ObservabilityConfig::from_env_with_overrides(log_dir);
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs, filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        config_file = ?sources.primary_file(),
        "CLI initialized"
    );

    let result = run(command, cli.json, cli.quiet, &config, &sources);
    if let Err(err) = &result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

fn run(
    command: Commands,
    json: bool,
    quiet: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let max_input = config.max_input();
    match command {
        Commands::Analyze(args) => {
            commands::analyze::cmd_analyze(args, json, quiet, config, max_input)
        }
        Commands::Sentences(args) => {
            commands::sentences::cmd_sentences(args, json, config, max_input)
        }
        Commands::Neologisms(args) => {
            commands::neologisms::cmd_neologisms(args, json, config, max_input)
        }
        Commands::Info(args) => commands::info::cmd_info(args, json, config, sources),
        Commands::Schema(args) => commands::schema::cmd_schema(args),
    }
}

/// Discover project config from the working directory, then apply `--config`.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path.to_path_buf(), "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow::anyhow!("{what} is not valid UTF-8: {}", p.display()))
}
