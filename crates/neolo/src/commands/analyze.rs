//! Analyze command: type/token statistics and diversity estimators.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use neolo_core::analysis::{self, AnalysisOptions, Check};
use neolo_core::config::Config;
use neolo_core::report::{EstimatorReport, StatsReport};

use super::{PunctuationArgs, read_lines, read_list, spinner};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Plain-text file to analyze.
    pub text: Utf8PathBuf,

    /// Reference dictionaries for neologism detection.
    #[arg(long, num_args = 1.., value_name = "DICT")]
    pub dicts: Vec<Utf8PathBuf>,

    /// Split into sentences first, optionally protecting abbreviations listed in ABBREV.
    #[arg(long, value_name = "ABBREV", num_args = 0..=1)]
    pub sents: Option<Option<Utf8PathBuf>>,

    /// Mean segmental type-token ratio.
    #[arg(long)]
    pub msttr: bool,

    /// Measure of lexical textual diversity.
    #[arg(long)]
    pub mltd: bool,

    /// Hypergeometric distribution diversity.
    #[arg(long)]
    pub hdd: bool,

    /// Word length distribution (over types).
    #[arg(short = 'w', long)]
    pub wordlen: bool,

    /// Word types ranked by frequency.
    #[arg(short = 't', long)]
    pub wordtypes: bool,

    /// Hapax legomena.
    #[arg(short = 'x', long)]
    pub hapax: bool,

    /// Punctuation ratio.
    #[arg(short = 'p', long)]
    pub punc_ratio: bool,

    /// Run every check.
    #[arg(long)]
    pub all: bool,

    /// Checks to run (comma-separated), in addition to the flags.
    #[arg(long, value_delimiter = ',', value_enum)]
    pub checks: Vec<Check>,

    #[command(flatten)]
    pub punctuation: PunctuationArgs,

    /// MSTTR segment length.
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,

    /// MLTD TTR threshold.
    #[arg(long, value_name = "T")]
    pub threshold: Option<f64>,

    /// HD-D sample size.
    #[arg(long, value_name = "N")]
    pub sample_size: Option<u64>,
}

impl AnalyzeArgs {
    fn checks(&self) -> Vec<Check> {
        if self.all {
            return Check::ALL.to_vec();
        }
        let flagged = [
            (self.msttr, Check::Msttr),
            (self.mltd, Check::Mltd),
            (self.hdd, Check::Hdd),
            (self.wordlen, Check::Wordlen),
            (self.wordtypes, Check::Wordtypes),
            (self.hapax, Check::Hapax),
            (self.punc_ratio, Check::PuncRatio),
        ];
        Check::ALL
            .into_iter()
            .filter(|check| {
                self.checks.contains(check) || flagged.iter().any(|(on, c)| *on && c == check)
            })
            .collect()
    }

    /// Merge flags, files and config into analysis options.
    fn options(&self, config: &Config, max_input: Option<usize>) -> anyhow::Result<AnalysisOptions> {
        let mut abbreviations = config.abbreviations.clone();
        if let Some(Some(ref path)) = self.sents {
            abbreviations.extend(
                read_list(path, max_input)
                    .with_context(|| format!("failed to read abbreviations from {path}"))?,
            );
        }

        let dict_paths = if self.dicts.is_empty() {
            &config.dictionaries
        } else {
            &self.dicts
        };
        let dictionaries = dict_paths
            .iter()
            .map(|path| {
                read_lines(path, max_input)
                    .with_context(|| format!("failed to read dictionary {path}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(AnalysisOptions {
            punctuation: self.punctuation.resolve(config),
            checks: self.checks(),
            sentences: self.sents.is_some(),
            abbreviations,
            dictionaries,
            msttr_window: self.window.unwrap_or_else(|| config.msttr_window()),
            mltd_threshold: self.threshold.unwrap_or_else(|| config.mltd_threshold()),
            hdd_sample_size: self.sample_size.unwrap_or_else(|| config.hdd_sample_size()),
        })
    }
}

/// Analyze a text file.
#[instrument(name = "cmd_analyze", skip_all, fields(text = %args.text))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let options = args.options(config, max_input)?;
    debug!(
        checks = ?options.checks,
        dictionaries = options.dictionaries.len(),
        sentences = options.sentences,
        "executing analyze command"
    );

    let lines = read_lines(&args.text, max_input)?;

    let pb = spinner(&format!("analyzing {}", args.text), quiet || global_json);
    let result = analysis::analyze_lines(&lines, &options);
    pb.finish_and_clear();
    let report = result.with_context(|| format!("failed to analyze {}", args.text))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.text, &report);
    }
    Ok(())
}

fn print_report(text: &Utf8Path, report: &StatsReport) {
    let basic = &report.basic;
    println!("{}", text.bold());
    println!(
        "\n  {} {} tokens, {} types, {} hapax",
        "Counts:".cyan(),
        basic.tokens,
        basic.types,
        basic.hapax,
    );
    println!(
        "  {} TTR {:.4}, HTR {:.4}, HTyR {:.4}",
        "Ratios:".cyan(),
        basic.ttr,
        basic.htr,
        basic.htyr,
    );

    if let Some(ref s) = report.sentences {
        println!(
            "\n  {} {} (avg {:.1} tokens)",
            "Sentences:".cyan(),
            s.count,
            s.avg_length,
        );
    }

    if let Some(ref n) = report.neologisms {
        println!(
            "\n  {} {} of {} types ({} dictionaries, {} tokens, {} types)",
            "Neologisms:".cyan(),
            n.count,
            basic.types,
            n.dictionaries,
            n.dictionary_tokens,
            n.dictionary_types,
        );
        for word in &n.neologisms {
            println!("    {word}");
        }
    }

    print_estimator("MSTTR", "window", report.msttr.as_ref());
    print_estimator("MLTD", "threshold", report.mltd.as_ref());
    print_estimator("HD-D", "sample", report.hdd.as_ref());

    if let Some(ratio) = report.punctuation_ratio {
        println!("\n  {} {:.4}", "Punctuation:".cyan(), ratio);
    }

    if let Some(ref bins) = report.word_lengths {
        println!("\n  {}", "Word lengths:".cyan());
        for bin in bins {
            println!("    {:>3}  {}", bin.length, bin.types);
        }
    }

    if let Some(ref ranked) = report.word_types {
        println!("\n  {}", "Word types:".cyan());
        for r in ranked {
            println!("    {:>5}  {:>6}  {}", r.rank, r.count, r.word);
        }
    }

    if let Some(ref hapax) = report.hapax {
        println!("\n  {} {}", "Hapax:".cyan(), hapax.len());
        for word in hapax {
            println!("    {}", word.dimmed());
        }
    }
}

fn print_estimator(name: &str, parameter: &str, report: Option<&EstimatorReport>) {
    if let Some(r) = report {
        println!(
            "\n  {} {:.4} ({parameter} {})",
            format!("{name}:").cyan(),
            r.value,
            r.parameter,
        );
    }
}
