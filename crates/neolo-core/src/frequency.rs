//! Type/token frequency statistics.

use std::collections::HashMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::report::{BasicStats, RankedType, WordLengthBin};
use crate::tokenize::Tokenizer;

/// Occurrence count of every word type in a text.
///
/// Immutable once built; the total token count is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCounts {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TypeCounts {
    /// Count the types of a token stream.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut total = 0;
        for token in tokens {
            let token = token.as_ref();
            if let Some(c) = counts.get_mut(token) {
                *c += 1;
            } else {
                counts.insert(token.to_string(), 1);
            }
            total += 1;
        }
        Self { counts, total }
    }

    /// Count of `word`, 0 if absent.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// `true` if `word` occurs at least once.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Sum of all counts.
    pub const fn total_tokens(&self) -> u64 {
        self.total
    }

    /// Number of distinct types.
    pub fn type_count(&self) -> usize {
        self.counts.len()
    }

    /// `true` when no tokens were counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(type, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Types occurring exactly once, sorted.
    pub fn hapax(&self) -> Vec<String> {
        let mut hapax: Vec<String> = self
            .counts
            .iter()
            .filter(|(_, c)| **c == 1)
            .map(|(w, _)| w.clone())
            .collect();
        hapax.sort();
        hapax
    }
}

impl FromIterator<(String, u64)> for TypeCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut total = 0;
        for (word, count) in iter {
            *counts.entry(word).or_insert(0) += count;
            total += count;
        }
        counts.retain(|_, c| *c > 0);
        Self { counts, total }
    }
}

/// Tokens, types, hapax legomena and their ratios.
#[tracing::instrument(skip_all)]
pub fn basic_stats(counts: &TypeCounts) -> AnalysisResult<BasicStats> {
    if counts.total_tokens() == 0 {
        return Err(AnalysisError::EmptyInput);
    }
    let tokens = counts.total_tokens();
    let types = counts.type_count();
    let hapax = counts.iter().filter(|(_, c)| *c == 1).count();

    Ok(BasicStats {
        tokens,
        types,
        hapax,
        ttr: types as f64 / tokens as f64,
        htr: hapax as f64 / tokens as f64,
        htyr: hapax as f64 / types as f64,
    })
}

/// Number of types of each length (in chars), from 1 up to the longest.
pub fn word_length_distribution(counts: &TypeCounts) -> Vec<WordLengthBin> {
    let lengths: Vec<usize> = counts.iter().map(|(w, _)| w.chars().count()).collect();
    let max_len = lengths.iter().copied().max().unwrap_or(0);
    let mut bins = vec![0usize; max_len + 1];
    for len in lengths {
        bins[len] += 1;
    }
    bins.into_iter()
        .enumerate()
        .skip(1)
        .map(|(length, types)| WordLengthBin { length, types })
        .collect()
}

/// Types ranked by count descending, ties broken alphabetically.
pub fn ranked_types(counts: &TypeCounts) -> Vec<RankedType> {
    let mut sorted: Vec<(&str, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, (word, count))| RankedType {
            rank: idx + 1,
            count,
            word: word.to_string(),
        })
        .collect()
}

/// Sorted types that occur exactly once.
pub fn hapax_legomena(counts: &TypeCounts) -> Vec<String> {
    counts.hapax()
}

/// Share of tokens that are punctuation under `tokenizer`'s configuration.
pub fn punctuation_ratio(counts: &TypeCounts, tokenizer: &Tokenizer) -> AnalysisResult<f64> {
    if counts.total_tokens() == 0 {
        return Err(AnalysisError::EmptyInput);
    }
    let punct: u64 = counts
        .iter()
        .filter(|(w, _)| tokenizer.is_punctuation_token(w))
        .map(|(_, c)| c)
        .sum();
    Ok(punct as f64 / counts.total_tokens() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::PunctuationConfig;

    fn counts(words: &[&str]) -> TypeCounts {
        TypeCounts::from_tokens(words.iter().copied())
    }

    #[test]
    fn counts_tokens_and_types() {
        let c = counts(&["one", "two", "two", "three", "three", "three"]);
        assert_eq!(c.total_tokens(), 6);
        assert_eq!(c.type_count(), 3);
        assert_eq!(c.get("three"), 3);
        assert_eq!(c.get("four"), 0);
        assert_eq!(c.hapax(), vec!["one"]);
    }

    #[test]
    fn from_pairs_drops_zero_counts() {
        let c: TypeCounts = [("a".to_string(), 2), ("b".to_string(), 0)]
            .into_iter()
            .collect();
        assert_eq!(c.total_tokens(), 2);
        assert!(!c.contains("b"));
    }

    #[test]
    fn basic_ratios() {
        let stats = basic_stats(&counts(&["a", "b", "b", "c"])).unwrap();
        assert_eq!(stats.tokens, 4);
        assert_eq!(stats.types, 3);
        assert_eq!(stats.hapax, 2);
        assert!((stats.ttr - 0.75).abs() < f64::EPSILON);
        assert!((stats.htr - 0.5).abs() < f64::EPSILON);
        assert!((stats.htyr - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn basic_stats_empty_errors() {
        assert!(matches!(
            basic_stats(&TypeCounts::default()),
            Err(AnalysisError::EmptyInput)
        ));
    }

    #[test]
    fn word_lengths_include_empty_bins() {
        let bins = word_length_distribution(&counts(&["a", "abc", "abc", "xyz"]));
        let pairs: Vec<_> = bins.iter().map(|b| (b.length, b.types)).collect();
        assert_eq!(pairs, vec![(1, 1), (2, 0), (3, 2)]);
    }

    #[test]
    fn word_lengths_count_chars_not_bytes() {
        let bins = word_length_distribution(&counts(&["été"]));
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[2].types, 1);
    }

    #[test]
    fn ranking_breaks_ties_alphabetically() {
        let ranked = ranked_types(&counts(&["b", "a", "c", "c", "b"]));
        let order: Vec<_> = ranked.iter().map(|r| (r.rank, r.count, r.word.as_str())).collect();
        assert_eq!(order, vec![(1, 2, "b"), (2, 2, "c"), (3, 1, "a")]);
    }

    #[test]
    fn punctuation_share() {
        let tokenizer = Tokenizer::new(PunctuationConfig::default());
        let c = counts(&["hello", ",", "world", "."]);
        assert!((punctuation_ratio(&c, &tokenizer).unwrap() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn punctuation_share_respects_config() {
        let tokenizer = Tokenizer::new(PunctuationConfig {
            hyphen: false,
            ..PunctuationConfig::default()
        });
        let c = counts(&["well-known", "-", "."]);
        assert!((punctuation_ratio(&c, &tokenizer).unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }
}
