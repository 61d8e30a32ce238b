//! Punctuation-aware tokenization and downcasing.
//!
//! Every punctuation mark becomes its own token; everything else is split on
//! whitespace. There is no stemming or language-specific segmentation.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sentences::AbbreviationGuard;

/// Punctuation marks that are split off as separate tokens.
const PUNCTUATION: &[char] = &[
    '_', '+', '-', '(', ')', '.', ',', ':', ';', '!', '?', '\'', '"', '[', ']',
];

/// Which optional marks count as punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctuationConfig {
    /// Treat `-` as punctuation (splits hyphenated words).
    pub hyphen: bool,
    /// Treat `'` as punctuation (splits contractions).
    pub apostrophe: bool,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            hyphen: true,
            apostrophe: true,
        }
    }
}

impl PunctuationConfig {
    /// The marks enabled by this configuration.
    pub fn marks(&self) -> Vec<char> {
        PUNCTUATION
            .iter()
            .copied()
            .filter(|&c| (self.hyphen || c != '-') && (self.apostrophe || c != '\''))
            .collect()
    }
}

/// Splits lines into lowercase tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: PunctuationConfig,
    marks: Vec<char>,
    pattern: Regex,
    guard: Option<AbbreviationGuard>,
}

impl Tokenizer {
    /// Build a tokenizer for the given punctuation set.
    pub fn new(config: PunctuationConfig) -> Self {
        let marks = config.marks();
        let class: String = marks.iter().map(|c| regex::escape(&c.to_string())).collect();
        let pattern = Regex::new(&format!("[{class}]")).expect("valid regex");
        Self {
            config,
            marks,
            pattern,
            guard: None,
        }
    }

    /// Keep the given strings whole instead of splitting their punctuation.
    pub fn with_protected<S: AsRef<str>>(mut self, protected: &[S]) -> Self {
        let guard = AbbreviationGuard::new(protected);
        self.guard = (!guard.is_empty()).then_some(guard);
        self
    }

    /// The punctuation configuration in use.
    pub const fn config(&self) -> PunctuationConfig {
        self.config
    }

    /// Tokenize one line.
    ///
    /// ```
    /// use neolo_core::tokenize::{PunctuationConfig, Tokenizer};
    ///
    /// let t = Tokenizer::new(PunctuationConfig::default());
    /// assert_eq!(t.tokenize_line("Hi, there!"), vec!["hi", ",", "there", "!"]);
    /// ```
    pub fn tokenize_line(&self, line: &str) -> Vec<String> {
        let protected = match &self.guard {
            Some(guard) => guard.protect(line),
            None => line.to_string(),
        };
        let padded = self.pattern.replace_all(&protected, " $0 ");
        padded
            .split_whitespace()
            .map(|tok| match &self.guard {
                Some(guard) => guard.restore(tok).to_lowercase(),
                None => tok.to_lowercase(),
            })
            .collect()
    }

    /// Tokenize each line, keeping line boundaries.
    pub fn tokenize_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|line| self.tokenize_line(line.as_ref()))
            .collect()
    }

    /// Tokenize all lines into one flat stream.
    pub fn tokens<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|line| self.tokenize_line(line.as_ref()))
            .collect()
    }

    /// `true` if `token` starts with one of the configured marks.
    pub fn is_punctuation_token(&self, token: &str) -> bool {
        token.chars().next().is_some_and(|c| self.marks.contains(&c))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(PunctuationConfig::default())
    }
}
