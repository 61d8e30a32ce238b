//! Prime generation.
//!
//! A sieve of Eratosthenes over odd candidates only. Index `i` of the sieve
//! stands for the odd number `2i + 3`; 2 is prepended separately.

use crate::error::{StatsError, StatsResult};

/// Return every prime `<= limit`, ascending.
///
/// Fails with [`StatsError::InvalidArgument`] when `limit < 2`. Callers that
/// want "no primes" for small bounds must handle that case themselves.
///
/// # Example
///
/// ```
/// use neolo_core::primes::primes_upto;
///
/// assert_eq!(primes_upto(11).unwrap(), vec![2, 3, 5, 7, 11]);
/// assert!(primes_upto(1).is_err());
/// ```
pub fn primes_upto(limit: i64) -> StatsResult<Vec<u64>> {
    if limit < 2 {
        return Err(StatsError::invalid(
            "primes_upto",
            format!("limit must be at least 2, got {limit}"),
        ));
    }
    let limit = usize::try_from(limit).map_err(|_| {
        StatsError::invalid(
            "primes_upto",
            format!("limit {limit} exceeds addressable memory"),
        )
    })?;
    Ok(odd_sieve(limit))
}

/// Sieve for `limit >= 2`.
pub(crate) fn odd_sieve(limit: usize) -> Vec<u64> {
    let len = if limit >= 3 { (limit - 3) / 2 + 1 } else { 0 };
    let mut composite = vec![false; len];

    let mut i = 0;
    loop {
        let p = 2 * i + 3;
        if p * p > limit {
            break;
        }
        if !composite[i] {
            // p*p is odd; consecutive odd multiples of p are p apart in index space.
            let mut j = (p * p - 3) / 2;
            while j < len {
                composite[j] = true;
                j += p;
            }
        }
        i += 1;
    }

    let mut primes = Vec::with_capacity(estimate_count(limit));
    primes.push(2);
    primes.extend(
        composite
            .iter()
            .enumerate()
            .filter(|(_, c)| !**c)
            .map(|(idx, _)| (2 * idx + 3) as u64),
    );
    primes
}

/// Upper estimate of π(n) for preallocation.
fn estimate_count(limit: usize) -> usize {
    if limit < 17 {
        return 7;
    }
    let n = limit as f64;
    (1.26 * n / n.ln()) as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_limits() {
        assert_eq!(primes_upto(2).unwrap(), vec![2]);
        assert_eq!(primes_upto(3).unwrap(), vec![2, 3]);
        assert_eq!(primes_upto(4).unwrap(), vec![2, 3]);
        assert_eq!(primes_upto(11).unwrap(), vec![2, 3, 5, 7, 11]);
    }

    #[test]
    fn rejects_limits_below_two() {
        for limit in [1, 0, -1, -11, i64::MIN] {
            let err = primes_upto(limit).unwrap_err();
            assert!(err.is_invalid_argument(), "limit {limit}: {err}");
        }
    }

    #[test]
    fn squares_of_primes_are_struck() {
        let primes = primes_upto(50).unwrap();
        for square in [9, 25, 49] {
            assert!(!primes.contains(&square));
        }
        assert_eq!(primes.last(), Some(&47));
    }

    #[test]
    fn prime_count_up_to_ten_thousand() {
        assert_eq!(primes_upto(10_000).unwrap().len(), 1229);
    }
}
