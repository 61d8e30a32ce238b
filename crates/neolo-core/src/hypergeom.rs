//! Zero-draw hypergeometric probability.
//!
//! For a population of `N` tokens of which `n` belong to one type, the
//! chance that a sample of `r` tokens drawn without replacement contains
//! none of that type is
//!
//! ```text
//! C(N-n, r) / C(N, r) = m!(N-r)! / (N!(m-r)!)    with m = N - n
//! ```
//!
//! Every factorial is factorized into prime powers and the fraction is
//! reduced before evaluation.

use crate::error::{StatsError, StatsResult};
use crate::factorial::{Factorizer, PrimePowerMap};
use crate::rational;

/// Compute `m!(N-r)! / (N!(m-r)!)` with `m = N - n`.
///
/// Requires `0 <= r <= N`, `0 <= n <= N` and `n + r <= N`; anything else
/// would ask for the factorial of a negative number and fails with
/// [`StatsError::InvalidArgument`].
pub fn hypergeom_ratio(r: i64, n: i64, total: i64) -> StatsResult<f64> {
    let (r, n, total) = validate(r, n, total)?;
    HypergeometricEvaluator::new(r, total)?.zero_draw_probability(n)
}

fn validate(r: i64, n: i64, total: i64) -> StatsResult<(u64, u64, u64)> {
    let op = "hypergeom_ratio";
    let as_u64 = |name: &str, v: i64| {
        u64::try_from(v).map_err(|_| StatsError::invalid(op, format!("{name} = {v} is negative")))
    };
    let r = as_u64("r", r)?;
    let n = as_u64("n", n)?;
    let total = as_u64("N", total)?;
    if r > total {
        return Err(StatsError::invalid(op, format!("draw size {r} exceeds population {total}")));
    }
    if n > total {
        return Err(StatsError::invalid(op, format!("type count {n} exceeds population {total}")));
    }
    if n + r > total {
        return Err(StatsError::invalid(
            op,
            format!("type count {n} plus draw size {r} exceeds population {total}"),
        ));
    }
    Ok((r, n, total))
}

/// Evaluates zero-draw probabilities for a fixed draw size and population.
///
/// The factorizations of `N!` and `(N-r)!` do not depend on the type count,
/// so they are computed once and reused.
#[derive(Debug, Clone)]
pub struct HypergeometricEvaluator {
    draw: u64,
    total: u64,
    factorizer: Factorizer,
    total_fact: PrimePowerMap,
    total_minus_draw_fact: PrimePowerMap,
}

impl HypergeometricEvaluator {
    /// Prepare an evaluator for samples of `draw` tokens out of `total`.
    pub fn new(draw: u64, total: u64) -> StatsResult<Self> {
        if draw > total {
            return Err(StatsError::invalid(
                "hypergeom_ratio",
                format!("draw size {draw} exceeds population {total}"),
            ));
        }
        let factorizer = Factorizer::new(total)?;
        let total_fact = factorizer.factorize(total);
        let total_minus_draw_fact = factorizer.factorize(total - draw);
        Ok(Self {
            draw,
            total,
            factorizer,
            total_fact,
            total_minus_draw_fact,
        })
    }

    /// Draw size `r`.
    pub const fn draw(&self) -> u64 {
        self.draw
    }

    /// Population size `N`.
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Probability that a sample contains no token of a type occurring
    /// `count` times.
    pub fn zero_draw_probability(&self, count: u64) -> StatsResult<f64> {
        let rest = self.total.checked_sub(count).ok_or_else(|| {
            StatsError::invalid(
                "hypergeom_ratio",
                format!("type count {count} exceeds population {}", self.total),
            )
        })?;
        let rest_minus_draw = rest.checked_sub(self.draw).ok_or_else(|| {
            StatsError::invalid(
                "hypergeom_ratio",
                format!(
                    "type count {count} plus draw size {} exceeds population {}",
                    self.draw, self.total
                ),
            )
        })?;

        let numerator = [
            self.factorizer.factorize(rest),
            self.total_minus_draw_fact.clone(),
        ];
        let denominator = [
            self.total_fact.clone(),
            self.factorizer.factorize(rest_minus_draw),
        ];
        rational::reduce_and_evaluate(&numerator, &denominator)
    }
}
