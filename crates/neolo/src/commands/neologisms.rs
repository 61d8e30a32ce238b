//! Neologisms command: words of a text missing from reference dictionaries.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use neolo_core::config::Config;
use neolo_core::frequency::TypeCounts;
use neolo_core::neologisms::{Lexicon, neologism_report};
use neolo_core::tokenize::Tokenizer;

use super::{PunctuationArgs, read_lines};

/// Arguments for the `neologisms` subcommand.
#[derive(Args, Debug)]
pub struct NeologismsArgs {
    /// Plain-text file to check.
    pub text: Utf8PathBuf,

    /// Reference dictionaries (plain-text corpora).
    #[arg(long, num_args = 1.., required = true, value_name = "DICT")]
    pub dicts: Vec<Utf8PathBuf>,

    #[command(flatten)]
    pub punctuation: PunctuationArgs,
}

/// List the neologisms of a file.
#[instrument(name = "cmd_neologisms", skip_all, fields(text = %args.text))]
pub fn cmd_neologisms(
    args: NeologismsArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(dictionaries = args.dicts.len(), "executing neologisms command");

    let tokenizer = Tokenizer::new(args.punctuation.resolve(config));
    let dictionaries = args
        .dicts
        .iter()
        .map(|path| {
            read_lines(path, max_input).with_context(|| format!("failed to read dictionary {path}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let lexicon = Lexicon::from_dictionaries(&tokenizer, &dictionaries);

    let lines = read_lines(&args.text, max_input)?;
    let counts = TypeCounts::from_tokens(tokenizer.tokens(&lines));
    let report = neologism_report(&counts, &lexicon);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for word in &report.neologisms {
            println!("{word}");
        }
        debug!(count = report.count, "neologisms listed");
        if report.neologisms.is_empty() {
            eprintln!("{}", "no neologisms found".dimmed());
        }
    }
    Ok(())
}
