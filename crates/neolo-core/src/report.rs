//! Report structs for text analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for use
//! in CLI JSON output and the published report schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Full analysis report; optional sections are present only when requested.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatsReport {
    /// Token, type and hapax counts with their ratios.
    pub basic: BasicStats,
    /// Sentence count and length, when the text was split into sentences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences: Option<SentenceReport>,
    /// Types absent from the reference dictionaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neologisms: Option<NeologismReport>,
    /// Mean segmental type-token ratio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msttr: Option<EstimatorReport>,
    /// Measure of lexical textual diversity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mltd: Option<EstimatorReport>,
    /// Hypergeometric distribution diversity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdd: Option<EstimatorReport>,
    /// Number of types of each length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_lengths: Option<Vec<WordLengthBin>>,
    /// Types ranked by frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_types: Option<Vec<RankedType>>,
    /// Types occurring once, sorted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hapax: Option<Vec<String>>,
    /// Share of tokens that are punctuation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub punctuation_ratio: Option<f64>,
}

/// Counts and ratios over the whole text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BasicStats {
    /// Number of tokens.
    pub tokens: u64,
    /// Number of distinct types.
    pub types: usize,
    /// Number of types occurring exactly once.
    pub hapax: usize,
    /// Type-token ratio.
    pub ttr: f64,
    /// Hapax-token ratio.
    pub htr: f64,
    /// Hapax-type ratio.
    pub htyr: f64,
}

/// Sentence statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceReport {
    /// Number of sentences found.
    pub count: usize,
    /// Mean tokens per sentence.
    pub avg_length: f64,
}

/// Neologism detection against one or more reference dictionaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NeologismReport {
    /// Types of the text missing from every dictionary, sorted.
    pub neologisms: Vec<String>,
    /// Number of neologisms.
    pub count: usize,
    /// Number of dictionary files merged.
    pub dictionaries: usize,
    /// Tokens across all dictionaries.
    pub dictionary_tokens: u64,
    /// Types across all dictionaries.
    pub dictionary_types: usize,
}

/// One diversity estimate and the parameter it was computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstimatorReport {
    /// Estimated value.
    pub value: f64,
    /// Window, threshold or sample size.
    pub parameter: f64,
}

/// Number of types with a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordLengthBin {
    /// Length in characters.
    pub length: usize,
    /// Types of this length.
    pub types: usize,
}

/// A type and its frequency rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedType {
    /// 1-based rank.
    pub rank: usize,
    /// Occurrences.
    pub count: u64,
    /// The type.
    pub word: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> StatsReport {
        StatsReport {
            basic: BasicStats {
                tokens: 4,
                types: 3,
                hapax: 2,
                ttr: 0.75,
                htr: 0.5,
                htyr: 2.0 / 3.0,
            },
            sentences: None,
            neologisms: None,
            msttr: None,
            mltd: None,
            hdd: None,
            word_lengths: None,
            word_types: None,
            hapax: None,
            punctuation_ratio: None,
        }
    }

    #[test]
    fn absent_sections_are_omitted() {
        let json = serde_json::to_value(minimal()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["basic"]);
    }

    #[test]
    fn present_sections_are_serialized() {
        let report = StatsReport {
            hdd: Some(EstimatorReport {
                value: 0.8,
                parameter: 42.0,
            }),
            hapax: Some(vec!["rare".to_string()]),
            ..minimal()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["hdd"]["parameter"], 42.0);
        assert_eq!(json["hapax"][0], "rare");
    }
}
