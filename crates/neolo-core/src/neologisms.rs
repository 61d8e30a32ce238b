//! Neologism detection against reference dictionaries.
//!
//! A "dictionary" is any plain-text corpus. Dictionaries are tokenized with
//! the same [`Tokenizer`] as the text so both sides agree on punctuation and
//! case.

use crate::frequency::TypeCounts;
use crate::report::NeologismReport;
use crate::tokenize::Tokenizer;

/// Merged type counts of one or more dictionaries.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    counts: TypeCounts,
    sources: usize,
}

impl Lexicon {
    /// Tokenize and merge the given dictionaries, each a list of lines.
    #[tracing::instrument(skip_all, fields(dictionaries = dictionaries.len()))]
    pub fn from_dictionaries<S: AsRef<str>>(tokenizer: &Tokenizer, dictionaries: &[Vec<S>]) -> Self {
        let counts = TypeCounts::from_tokens(
            dictionaries
                .iter()
                .flat_map(|lines| tokenizer.tokens(lines)),
        );
        Self {
            counts,
            sources: dictionaries.len(),
        }
    }

    /// `true` if `word` appears in any dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains(word)
    }

    /// Number of dictionaries merged.
    pub const fn sources(&self) -> usize {
        self.sources
    }

    /// Merged counts.
    pub const fn counts(&self) -> &TypeCounts {
        &self.counts
    }
}

/// Text types missing from `lexicon`, sorted.
pub fn find_neologisms(text: &TypeCounts, lexicon: &Lexicon) -> Vec<String> {
    let mut found: Vec<String> = text
        .iter()
        .filter(|(word, _)| !lexicon.contains(word))
        .map(|(word, _)| word.to_string())
        .collect();
    found.sort();
    found
}

/// Neologisms together with dictionary totals.
pub fn neologism_report(text: &TypeCounts, lexicon: &Lexicon) -> NeologismReport {
    let neologisms = find_neologisms(text, lexicon);
    NeologismReport {
        count: neologisms.len(),
        neologisms,
        dictionaries: lexicon.sources(),
        dictionary_tokens: lexicon.counts().total_tokens(),
        dictionary_types: lexicon.counts().type_count(),
    }
}
