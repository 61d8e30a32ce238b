//! Sentences command: one sentence per line.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use neolo_core::config::Config;
use neolo_core::sentences::SentenceSplitter;

use super::{read_lines, read_list};

/// Arguments for the `sentences` subcommand.
#[derive(Args, Debug)]
pub struct SentencesArgs {
    /// Plain-text file to split.
    pub text: Utf8PathBuf,

    /// File of abbreviations (one per line) whose periods do not end a sentence.
    #[arg(long, value_name = "FILE")]
    pub abbrevs: Option<Utf8PathBuf>,

    /// Also print a final fragment that lacks terminal punctuation.
    #[arg(long)]
    pub keep_trailing: bool,
}

/// Split a file into sentences.
#[instrument(name = "cmd_sentences", skip_all, fields(text = %args.text))]
pub fn cmd_sentences(
    args: SentencesArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let mut abbreviations = config.abbreviations.clone();
    if let Some(ref path) = args.abbrevs {
        abbreviations.extend(
            read_list(path, max_input)
                .with_context(|| format!("failed to read abbreviations from {path}"))?,
        );
    }
    debug!(abbreviations = abbreviations.len(), keep_trailing = args.keep_trailing, "executing sentences command");

    let lines = read_lines(&args.text, max_input)?;
    let sentences = SentenceSplitter::new()
        .with_abbreviations(&abbreviations)
        .keep_trailing(args.keep_trailing)
        .split(&lines);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&sentences)?);
    } else {
        for sentence in &sentences {
            println!("{sentence}");
        }
    }
    Ok(())
}
