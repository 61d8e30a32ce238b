//! Full text analysis.
//!
//! [`analyze_lines`] tokenizes the input once and runs every requested
//! check over the same token stream. Basic counts are always computed;
//! neologisms are reported whenever dictionaries are supplied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diversity::{self, DEFAULT_HDD_SAMPLE_SIZE, DEFAULT_MLTD_THRESHOLD, DEFAULT_MSTTR_WINDOW};
use crate::error::{AnalysisError, AnalysisResult};
use crate::frequency::{self, TypeCounts};
use crate::neologisms::{self, Lexicon};
use crate::report::{EstimatorReport, SentenceReport, StatsReport};
use crate::sentences::SentenceSplitter;
use crate::tokenize::{PunctuationConfig, Tokenizer};

/// All optional check names, in [`Check::ALL`] order.
pub const ALL_CHECKS: &[&str] = &CHECK_NAMES;

const CHECK_NAMES: [&str; Check::ALL.len()] = {
    let mut names = [""; Check::ALL.len()];
    let mut i = 0;
    while i < names.len() {
        names[i] = Check::ALL[i].as_str();
        i += 1;
    }
    names
};

/// An optional check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Check {
    /// Mean segmental type-token ratio.
    Msttr,
    /// Measure of lexical textual diversity.
    Mltd,
    /// Hypergeometric distribution diversity.
    Hdd,
    /// Word length distribution.
    Wordlen,
    /// Ranked word types.
    Wordtypes,
    /// Hapax legomena.
    Hapax,
    /// Punctuation ratio.
    #[cfg_attr(feature = "clap", value(name = "punc_ratio"))]
    PuncRatio,
}

impl Check {
    /// Every check, in report order.
    pub const ALL: [Self; 7] = [
        Self::Msttr,
        Self::Mltd,
        Self::Hdd,
        Self::Wordlen,
        Self::Wordtypes,
        Self::Hapax,
        Self::PuncRatio,
    ];

    /// The check's name as listed in [`ALL_CHECKS`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Msttr => "msttr",
            Self::Mltd => "mltd",
            Self::Hdd => "hdd",
            Self::Wordlen => "wordlen",
            Self::Wordtypes => "wordtypes",
            Self::Hapax => "hapax",
            Self::PuncRatio => "punc_ratio",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Check {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AnalysisError::UnknownCheck {
                name: s.to_string(),
                available: ALL_CHECKS.join(", "),
            })
    }
}

/// Parse check names, failing on the first unknown one.
pub fn parse_checks<S: AsRef<str>>(names: &[S]) -> AnalysisResult<Vec<Check>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// What to compute and with which parameters.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Punctuation handling for the tokenizer.
    pub punctuation: PunctuationConfig,
    /// Optional checks to run.
    pub checks: Vec<Check>,
    /// Split the text into sentences before tokenizing.
    pub sentences: bool,
    /// Strings protected from sentence splitting and tokenization; ignored
    /// unless `sentences` is set.
    pub abbreviations: Vec<String>,
    /// Reference dictionaries, each as its lines.
    pub dictionaries: Vec<Vec<String>>,
    /// MSTTR segment length.
    pub msttr_window: usize,
    /// MLTD TTR threshold.
    pub mltd_threshold: f64,
    /// HD-D sample size.
    pub hdd_sample_size: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            punctuation: PunctuationConfig::default(),
            checks: Vec::new(),
            sentences: false,
            abbreviations: Vec::new(),
            dictionaries: Vec::new(),
            msttr_window: DEFAULT_MSTTR_WINDOW,
            mltd_threshold: DEFAULT_MLTD_THRESHOLD,
            hdd_sample_size: DEFAULT_HDD_SAMPLE_SIZE,
        }
    }
}

impl AnalysisOptions {
    fn wants(&self, check: Check) -> bool {
        self.checks.contains(&check)
    }
}

/// Analyze `lines` of text.
///
/// # Errors
///
/// [`AnalysisError::EmptyInput`] when the text has no tokens, and
/// [`AnalysisError::Stats`] when a requested estimator cannot be computed
/// (for instance HD-D on a text shorter than its sample size).
#[tracing::instrument(skip_all, fields(lines = lines.len(), checks = ?options.checks))]
pub fn analyze_lines<S: AsRef<str>>(
    lines: &[S],
    options: &AnalysisOptions,
) -> AnalysisResult<StatsReport> {
    // Abbreviations only matter when the text is split into sentences.
    let tokenizer = if options.sentences {
        Tokenizer::new(options.punctuation).with_protected(&options.abbreviations)
    } else {
        Tokenizer::new(options.punctuation)
    };

    let (tokens, sentence_report) = if options.sentences {
        let sentences = SentenceSplitter::new()
            .with_abbreviations(&options.abbreviations)
            .split(lines);
        let tokens = tokenizer.tokens(&sentences);
        let report = (!sentences.is_empty()).then(|| SentenceReport {
            count: sentences.len(),
            avg_length: tokens.len() as f64 / sentences.len() as f64,
        });
        tracing::debug!(sentences = sentences.len(), "split into sentences");
        (tokens, report)
    } else {
        (tokenizer.tokens(lines), None)
    };

    let counts = TypeCounts::from_tokens(&tokens);
    let basic = frequency::basic_stats(&counts)?;
    tracing::debug!(tokens = basic.tokens, types = basic.types, "counted types");

    let neologisms = if options.dictionaries.is_empty() {
        None
    } else {
        let lexicon = Lexicon::from_dictionaries(&tokenizer, &options.dictionaries);
        Some(neologisms::neologism_report(&counts, &lexicon))
    };

    let msttr = if options.wants(Check::Msttr) {
        Some(EstimatorReport {
            value: diversity::msttr(&tokens, options.msttr_window)?,
            parameter: options.msttr_window as f64,
        })
    } else {
        None
    };

    let mltd = if options.wants(Check::Mltd) {
        Some(EstimatorReport {
            value: diversity::mltd(&tokens, options.mltd_threshold)?,
            parameter: options.mltd_threshold,
        })
    } else {
        None
    };

    let hdd = if options.wants(Check::Hdd) {
        Some(EstimatorReport {
            value: diversity::hdd(&counts, options.hdd_sample_size)?,
            parameter: options.hdd_sample_size as f64,
        })
    } else {
        None
    };

    let punctuation_ratio = if options.wants(Check::PuncRatio) {
        Some(frequency::punctuation_ratio(&counts, &tokenizer)?)
    } else {
        None
    };

    Ok(StatsReport {
        basic,
        sentences: sentence_report,
        neologisms,
        msttr,
        mltd,
        hdd,
        word_lengths: options
            .wants(Check::Wordlen)
            .then(|| frequency::word_length_distribution(&counts)),
        word_types: options
            .wants(Check::Wordtypes)
            .then(|| frequency::ranked_types(&counts)),
        hapax: options
            .wants(Check::Hapax)
            .then(|| frequency::hapax_legomena(&counts)),
        punctuation_ratio,
    })
}
