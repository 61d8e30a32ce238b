//! Factorials as prime-power products.
//!
//! `n!` is represented as `∏ p^e` over the primes `p <= n`, where each
//! exponent comes from Legendre's formula. This keeps factorials of numbers
//! in the tens of thousands manipulable without ever materializing them.
//!
//! See Wu (1993), "An accurate computation of the hypergeometric
//! distribution function".

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::One;

use crate::error::{StatsError, StatsResult};
use crate::primes;

/// Prime → exponent mapping, ordered by prime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimePowerMap {
    exponents: BTreeMap<u64, u64>,
}

impl PrimePowerMap {
    /// An empty product (the value 1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Exponent of `prime`, 0 if absent.
    pub fn exponent(&self, prime: u64) -> u64 {
        self.exponents.get(&prime).copied().unwrap_or(0)
    }

    /// Set the exponent of `prime`. A zero exponent removes the prime.
    pub fn set(&mut self, prime: u64, exponent: u64) {
        if exponent == 0 {
            self.exponents.remove(&prime);
        } else {
            self.exponents.insert(prime, exponent);
        }
    }

    /// Add every exponent of `other` into `self`.
    pub fn multiply(&mut self, other: &Self) {
        for (&p, &e) in &other.exponents {
            *self.exponents.entry(p).or_insert(0) += e;
        }
    }

    /// Iterate `(prime, exponent)` pairs in ascending prime order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.exponents.iter().map(|(&p, &e)| (p, e))
    }

    /// Number of distinct primes.
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// `true` for the empty product.
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Evaluate `∏ p^e` exactly.
    pub fn evaluate(&self) -> StatsResult<BigUint> {
        let mut product = BigUint::one();
        for (p, e) in self.iter() {
            let e = usize::try_from(e).map_err(|_| {
                StatsError::invalid("evaluate", format!("exponent {e} of {p} is too large"))
            })?;
            product *= num_traits::pow(BigUint::from(p), e);
        }
        Ok(product)
    }
}

impl FromIterator<(u64, u64)> for PrimePowerMap {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (p, e) in iter {
            map.set(p, map.exponent(p) + e);
        }
        map
    }
}

/// Exponent of prime `p` in `n!`: `Σ floor(n / p^i)` for `i >= 1`.
///
/// Returns 0 when `n < p`. Fails for `p < 2`, where the sum never terminates.
///
/// ```
/// use neolo_core::factorial::legendre_exponent;
///
/// assert_eq!(legendre_exponent(5, 2).unwrap(), 3);
/// assert_eq!(legendre_exponent(1, 2).unwrap(), 0);
/// ```
pub fn legendre_exponent(n: u64, p: u64) -> StatsResult<u64> {
    if p < 2 {
        return Err(StatsError::invalid(
            "legendre_exponent",
            format!("base must be a prime >= 2, got {p}"),
        ));
    }
    Ok(legendre(n, p))
}

fn legendre(n: u64, p: u64) -> u64 {
    let mut total = 0;
    let mut power = p;
    while power <= n {
        total += n / power;
        match power.checked_mul(p) {
            Some(next) => power = next,
            None => break,
        }
    }
    total
}

/// Prime-power factorization of `n!`.
///
/// `0!` and `1!` are the empty product.
pub fn factorize_factorial(n: u64) -> StatsResult<PrimePowerMap> {
    Ok(Factorizer::new(n)?.factorize(n))
}

/// Factorizes many factorials against one shared sieve.
#[derive(Debug, Clone)]
pub struct Factorizer {
    bound: u64,
    primes: Vec<u64>,
}

impl Factorizer {
    /// Sieve once for all factorials up to `bound!`.
    pub fn new(bound: u64) -> StatsResult<Self> {
        // No primes divide 0! or 1!, so skip the sieve rather than ask it for an empty range.
        let primes = if bound < 2 {
            Vec::new()
        } else {
            let limit = i64::try_from(bound).map_err(|_| {
                StatsError::invalid("factorize_factorial", format!("{bound} is too large"))
            })?;
            primes::primes_upto(limit)?
        };
        Ok(Self { bound, primes })
    }

    /// Largest `n` this factorizer can handle.
    pub const fn bound(&self) -> u64 {
        self.bound
    }

    /// Factorize `n!`. Requires `n <= bound`.
    pub(crate) fn factorize(&self, n: u64) -> PrimePowerMap {
        let end = self.primes.partition_point(|&p| p <= n);
        PrimePowerMap {
            exponents: self.primes[..end]
                .iter()
                .map(|&p| (p, legendre(n, p)))
                .collect(),
        }
    }

    /// Factorize `n!`, failing when `n` exceeds the sieved bound.
    pub fn try_factorize(&self, n: u64) -> StatsResult<PrimePowerMap> {
        if n > self.bound {
            return Err(StatsError::invalid(
                "factorize_factorial",
                format!("{n}! exceeds the factorizer bound {}", self.bound),
            ));
        }
        Ok(self.factorize(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legendre_known_values() {
        assert_eq!(legendre_exponent(1, 2).unwrap(), 0);
        assert_eq!(legendre_exponent(5, 2).unwrap(), 3);
        assert_eq!(legendre_exponent(5, 3).unwrap(), 1);
        assert_eq!(legendre_exponent(100, 5).unwrap(), 24);
        assert_eq!(legendre_exponent(3, 5).unwrap(), 0);
    }

    #[test]
    fn legendre_rejects_bases_below_two() {
        assert!(legendre_exponent(10, 1).unwrap_err().is_invalid_argument());
        assert!(legendre_exponent(10, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn legendre_does_not_overflow_near_max() {
        // p^i overflows u64 before exceeding n.
        assert!(legendre_exponent(u64::MAX, 2).unwrap() > 0);
    }

    #[test]
    fn five_factorial() {
        let map = factorize_factorial(5).unwrap();
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(2, 3), (3, 1), (5, 1)]);
        assert_eq!(map.evaluate().unwrap(), BigUint::from(120u32));
    }

    #[test]
    fn zero_and_one_factorial_are_empty() {
        assert!(factorize_factorial(0).unwrap().is_empty());
        assert!(factorize_factorial(1).unwrap().is_empty());
        assert_eq!(
            factorize_factorial(1).unwrap().evaluate().unwrap(),
            BigUint::one()
        );
    }

    #[test]
    fn every_prime_up_to_n_has_positive_exponent() {
        let n = 997;
        let map = factorize_factorial(n).unwrap();
        let primes = primes::primes_upto(n as i64).unwrap();
        assert_eq!(map.len(), primes.len());
        for p in primes {
            assert!(map.exponent(p) >= 1, "prime {p} missing from {n}!");
        }
    }

    #[test]
    fn factorizer_matches_fresh_factorization() {
        let f = Factorizer::new(300).unwrap();
        for n in [0, 1, 2, 17, 150, 300] {
            assert_eq!(f.try_factorize(n).unwrap(), factorize_factorial(n).unwrap());
        }
        assert!(f.try_factorize(301).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn multiply_adds_exponents() {
        let mut a = factorize_factorial(4).unwrap(); // 2^3 * 3
        a.multiply(&factorize_factorial(3).unwrap()); // 2 * 3
        assert_eq!(a.exponent(2), 4);
        assert_eq!(a.exponent(3), 2);
        assert_eq!(a.evaluate().unwrap(), BigUint::from(144u32));
    }

    #[test]
    fn set_zero_removes_prime() {
        let mut map: PrimePowerMap = [(2, 2), (7, 1)].into_iter().collect();
        map.set(7, 0);
        assert_eq!(map.len(), 1);
        assert_eq!(map.exponent(7), 0);
    }
}
