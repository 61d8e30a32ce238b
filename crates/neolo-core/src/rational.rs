//! Rational reduction of prime-power products.
//!
//! A ratio of factorial products is merged per side, common prime powers are
//! cancelled, and only the reduced remainders are multiplied out.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{StatsError, StatsResult};
use crate::factorial::PrimePowerMap;

/// A fraction whose sides share no prime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReducedFraction {
    /// Primes left over on the numerator side.
    pub numerator: PrimePowerMap,
    /// Primes left over on the denominator side.
    pub denominator: PrimePowerMap,
}

impl ReducedFraction {
    /// Merge each side's factors and cancel common prime powers.
    pub fn reduce(num_maps: &[PrimePowerMap], den_maps: &[PrimePowerMap]) -> Self {
        let numerator = merge(num_maps);
        let denominator = merge(den_maps);

        let mut reduced_num = PrimePowerMap::new();
        let mut reduced_den = PrimePowerMap::new();

        for (p, e) in numerator.iter() {
            let d = denominator.exponent(p);
            if e > d {
                reduced_num.set(p, e - d);
            }
        }
        for (p, d) in denominator.iter() {
            let e = numerator.exponent(p);
            if d > e {
                reduced_den.set(p, d - e);
            }
        }

        Self {
            numerator: reduced_num,
            denominator: reduced_den,
        }
    }

    /// Evaluate the fraction as `f64`.
    ///
    /// Both sides are computed exactly, then each is scaled to its leading
    /// 64 bits before dividing, so the quotient is representable whenever
    /// the true ratio is.
    pub fn to_f64(&self) -> StatsResult<f64> {
        let num = self.numerator.evaluate()?;
        let den = self.denominator.evaluate()?;
        ratio_to_f64(&num, &den)
    }
}

fn merge(maps: &[PrimePowerMap]) -> PrimePowerMap {
    let mut merged = PrimePowerMap::new();
    for map in maps {
        merged.multiply(map);
    }
    merged
}

/// Merge, cancel, and evaluate `∏ num_maps / ∏ den_maps`.
pub fn reduce_and_evaluate(
    num_maps: &[PrimePowerMap],
    den_maps: &[PrimePowerMap],
) -> StatsResult<f64> {
    ReducedFraction::reduce(num_maps, den_maps).to_f64()
}

fn ratio_to_f64(num: &BigUint, den: &BigUint) -> StatsResult<f64> {
    if den.is_zero() {
        return Err(StatsError::div_zero(
            "reduce_and_evaluate",
            "reduced denominator is zero",
        ));
    }
    let (num_mantissa, num_shift) = leading_bits(num);
    let (den_mantissa, den_shift) = leading_bits(den);
    let shift = num_shift - den_shift;
    let scale = i32::try_from(shift).unwrap_or(if shift < 0 { i32::MIN } else { i32::MAX });
    Ok(num_mantissa / den_mantissa * 2f64.powi(scale))
}

/// Split `value` into `(mantissa, shift)` with `value ≈ mantissa * 2^shift`
/// and `mantissa < 2^64`.
fn leading_bits(value: &BigUint) -> (f64, i64) {
    let bits = value.bits();
    if bits <= 64 {
        return (value.to_f64().unwrap_or(f64::INFINITY), 0);
    }
    let shift = bits - 64;
    let top = value >> shift;
    (top.to_f64().unwrap_or(f64::INFINITY), shift as i64)
}
