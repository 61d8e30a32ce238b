//! Lexical diversity estimators.
//!
//! - HD-D (McCarthy & Jarvis 2007, 2010): expected TTR of a random sample.
//! - MSTTR (Johnson 1944): mean TTR over fixed-size segments.
//! - MLTD (McCarthy 2005): mean segment length before TTR falls below a
//!   threshold.

use std::collections::{HashMap, HashSet};

use crate::error::{StatsError, StatsResult};
use crate::frequency::TypeCounts;
use crate::hypergeom::HypergeometricEvaluator;

/// Default HD-D sample size.
pub const DEFAULT_HDD_SAMPLE_SIZE: u64 = 42;

/// Default MSTTR segment length.
pub const DEFAULT_MSTTR_WINDOW: usize = 100;

/// Default MLTD TTR threshold.
pub const DEFAULT_MLTD_THRESHOLD: f64 = 0.72;

/// HD-D over a type/count table.
///
/// Each type contributes `(1 - P(type absent from sample)) / sample_size`.
/// The text must hold at least `sample_size` tokens.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] when `sample_size` is 0 or larger than
/// the number of tokens.
#[tracing::instrument(skip(type_counts), fields(types = type_counts.type_count()))]
pub fn hdd(type_counts: &TypeCounts, sample_size: u64) -> StatsResult<f64> {
    if sample_size == 0 {
        return Err(StatsError::invalid("hdd", "sample size must be positive"));
    }
    let total = type_counts.total_tokens();
    if total < sample_size {
        return Err(StatsError::invalid(
            "hdd",
            format!("text has {total} tokens, fewer than the sample size {sample_size}"),
        ));
    }

    let evaluator = HypergeometricEvaluator::new(sample_size, total)?;
    let weight = 1.0 / sample_size as f64;
    let mut by_count: HashMap<u64, f64> = HashMap::new();
    let mut sum = 0.0;

    for (_, count) in type_counts.iter() {
        let contribution = match by_count.get(&count) {
            Some(&c) => c,
            None => {
                // With fewer than `sample_size` other tokens, every sample holds this type.
                let absent = if count + sample_size > total {
                    0.0
                } else {
                    evaluator.zero_draw_probability(count)?
                };
                let c = (1.0 - absent) * weight;
                by_count.insert(count, c);
                c
            }
        };
        sum += contribution;
    }
    Ok(sum)
}

/// Mean segmental type-token ratio.
///
/// Tokens are cut into consecutive windows of `window` tokens; a shorter
/// final window still counts as a segment.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] for `window == 0`,
/// [`StatsError::DivisionByZero`] for an empty token sequence.
#[tracing::instrument(skip(tokens), fields(tokens = tokens.len()))]
pub fn msttr<S: AsRef<str>>(tokens: &[S], window: usize) -> StatsResult<f64> {
    if window == 0 {
        return Err(StatsError::invalid("msttr", "window must be positive"));
    }
    if tokens.is_empty() {
        return Err(StatsError::div_zero("msttr", "no segments in an empty text"));
    }

    let ttrs: Vec<f64> = tokens
        .chunks(window)
        .map(|segment| {
            let types: HashSet<&str> = segment.iter().map(AsRef::as_ref).collect();
            types.len() as f64 / segment.len() as f64
        })
        .collect();
    Ok(ttrs.iter().sum::<f64>() / ttrs.len() as f64)
}

/// Measure of lexical textual diversity.
///
/// A segment grows token by token and closes, including the token that
/// triggered it, as soon as its TTR drops below `threshold`. The result is
/// tokens scanned per closed segment.
///
/// # Errors
///
/// [`StatsError::InvalidArgument`] for a non-finite threshold,
/// [`StatsError::DivisionByZero`] when no segment ever closes.
#[tracing::instrument(skip(tokens), fields(tokens = tokens.len()))]
pub fn mltd<S: AsRef<str>>(tokens: &[S], threshold: f64) -> StatsResult<f64> {
    if !threshold.is_finite() {
        return Err(StatsError::invalid(
            "mltd",
            format!("threshold must be finite, got {threshold}"),
        ));
    }

    let mut segments = 0u64;
    let mut seg_types: HashSet<&str> = HashSet::new();
    let mut seg_len = 0usize;

    for token in tokens {
        seg_types.insert(token.as_ref());
        seg_len += 1;
        if (seg_types.len() as f64 / seg_len as f64) < threshold {
            segments += 1;
            seg_types.clear();
            seg_len = 0;
        }
    }

    if segments == 0 {
        return Err(StatsError::div_zero(
            "mltd",
            format!("TTR never fell below {threshold}, no segment closed"),
        ));
    }
    Ok(tokens.len() as f64 / segments as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn msttr_single_full_window() {
        let toks = words("a b c a");
        assert!((msttr(&toks, 4).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn msttr_includes_short_final_window() {
        // [a a] -> 0.5, [b c] -> 1.0, [d] -> 1.0
        let toks = words("a a b c d");
        let value = msttr(&toks, 2).unwrap();
        assert!((value - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn msttr_empty_is_division_by_zero() {
        let empty: [&str; 0] = [];
        assert!(msttr(&empty, 100).unwrap_err().is_division_by_zero());
    }

    #[test]
    fn msttr_zero_window_rejected() {
        assert!(msttr(&["a"], 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn mltd_closes_on_triggering_token() {
        // a b a -> 2/3 < 0.72 closes at the 3rd token; c c -> 1/2 closes at the 5th.
        let toks = words("a b a c c");
        assert!((mltd(&toks, 0.72).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn mltd_counts_unclosed_tail_tokens() {
        // Segment closes after "a a"; "b c" never closes but still counts as scanned.
        let toks = words("a a b c");
        assert!((mltd(&toks, 0.72).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn mltd_never_closing_is_division_by_zero() {
        let toks = words("every word is different here");
        assert!(mltd(&toks, 0.72).unwrap_err().is_division_by_zero());
    }

    #[test]
    fn mltd_empty_is_division_by_zero() {
        let empty: [&str; 0] = [];
        assert!(mltd(&empty, 0.72).unwrap_err().is_division_by_zero());
    }

    #[test]
    fn mltd_rejects_nan_threshold() {
        assert!(mltd(&["a", "a"], f64::NAN).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn hdd_all_distinct_equals_one() {
        // Each hapax is absent with probability (N-r)/N, so it adds 1/N.
        let toks: Vec<String> = (0..100).map(|i| format!("w{i}")).collect();
        let counts = TypeCounts::from_tokens(&toks);
        let value = hdd(&counts, 42).unwrap();
        assert!((value - 1.0).abs() < 1e-9, "{value}");
    }

    #[test]
    fn hdd_single_type_is_one_sample_type() {
        let counts = TypeCounts::from_tokens(std::iter::repeat_n("the", 50));
        let value = hdd(&counts, 42).unwrap();
        assert!((value - 1.0 / 42.0).abs() < 1e-12);
    }

    #[test]
    fn hdd_is_bounded_by_one() {
        let text = "the cat sat on the mat and the dog sat on the log while a bird \
                    sang in the tree and the sun shone on the hill over the town";
        let counts = TypeCounts::from_tokens(text.split_whitespace().cycle().take(400));
        let value = hdd(&counts, 42).unwrap();
        assert!(value > 0.0 && value < 1.0, "{value}");
    }

    #[test]
    fn hdd_needs_enough_tokens() {
        let counts = TypeCounts::from_tokens(words("too few tokens"));
        assert!(hdd(&counts, 42).unwrap_err().is_invalid_argument());
        assert!(hdd(&TypeCounts::default(), 42).unwrap_err().is_invalid_argument());
        assert!(hdd(&counts, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn hdd_frequent_type_contributes_full_weight() {
        // 45 tokens: "x" occurs 40 times, so 40 + 42 > 45 and "x" is always drawn.
        let mut toks = vec!["x"; 40];
        toks.extend(["a", "b", "c", "d", "e"]);
        let counts = TypeCounts::from_tokens(&toks);
        let value = hdd(&counts, 42).unwrap();
        // A hapax is absent with probability C(44,42)/C(45,42) = 1/15.
        let want = (1.0 + 5.0 * (14.0 / 15.0)) / 42.0;
        assert!((value - want).abs() < 1e-12, "{value} vs {want}");
    }
}
