//! Info command implementation

use clap::Args;
use neolo_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    hdd_sample_size: u64,
    msttr_window: usize,
    mltd_threshold: f64,
    hyphen_is_punctuation: bool,
    apostrophe_is_punctuation: bool,
    abbreviations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dictionaries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let punctuation = config.punctuation();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            hdd_sample_size: config.hdd_sample_size(),
            msttr_window: config.msttr_window(),
            mltd_threshold: config.mltd_threshold(),
            hyphen_is_punctuation: punctuation.hyphen,
            apostrophe_is_punctuation: punctuation.apostrophe,
            abbreviations: config.abbreviations.len(),
            dictionaries: config.dictionaries.iter().map(|p| p.to_string()).collect(),
            max_input_bytes: config.max_input(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    print_text(&full_info);
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("{}: {value}", label.dimmed());
}

fn print_text(info: &FullInfo) {
    let package = &info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    let optional = [
        ("", package.description),
        ("License", package.license),
        ("Repository", package.repository),
    ];
    for (label, value) in optional.into_iter().filter(|(_, v)| !v.is_empty()) {
        if label.is_empty() {
            println!("{value}");
        } else {
            field(label, value);
        }
    }

    let cfg = &info.config;
    section("Configuration");
    match &cfg.config_file {
        Some(path) => field("Config file", path.cyan()),
        None => field("Config file", "none loaded".yellow()),
    }
    field("Log level", &cfg.log_level);
    if let Some(dir) = &cfg.log_dir {
        field("Log directory", dir);
    }

    section("Estimators");
    field("HD-D sample size", cfg.hdd_sample_size);
    field("MSTTR window", cfg.msttr_window);
    field("MLTD threshold", cfg.mltd_threshold);

    section("Tokenizer");
    field("Split hyphens", cfg.hyphen_is_punctuation);
    field("Split apostrophes", cfg.apostrophe_is_punctuation);
    field("Abbreviations", cfg.abbreviations);
    if !cfg.dictionaries.is_empty() {
        field("Dictionaries", cfg.dictionaries.join(", "));
    }
    match cfg.max_input_bytes {
        Some(max) => field("Input limit", format!("{max} bytes")),
        None => field("Input limit", "disabled".yellow()),
    }
}
