//! Integer ratio simplification
//!
//! Ratios arrive as non-negative decimals. They are lifted to integers by one
//! of two scaling rules and then reduced by their greatest common divisor.

use crate::error::{MixError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Decimal's own scale limit
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Decimal places kept by precision scaling unless configured lower
pub const DEFAULT_MAX_RATIO_DECIMALS: u32 = MAX_DECIMAL_SCALE;

/// Factor used by fixed scaling
pub const DEFAULT_FIXED_MULTIPLIER: u32 = 10;

/// Rule for turning decimal ratios into integers before reduction
///
/// Neither rule lets a non-zero ratio collapse to a zero term: when a
/// ratio is too small for the configured places or multiplier, the scale
/// is raised a decimal place at a time until every term is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioScaling {
    /// Multiply by 10^d where d is the largest number of decimal places
    /// among the ratios, after rounding them to `max_decimals`
    Precision { max_decimals: u32 },
    /// Multiply by a constant and round half away from zero
    Fixed { multiplier: u32 },
}

impl Default for RatioScaling {
    fn default() -> Self {
        RatioScaling::Precision {
            max_decimals: DEFAULT_MAX_RATIO_DECIMALS,
        }
    }
}

/// Ratio in lowest terms, every term strictly positive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimplifiedRatio {
    terms: Vec<u128>,
}

impl SimplifiedRatio {
    pub fn terms(&self) -> &[u128] {
        &self.terms
    }
}

impl fmt::Display for SimplifiedRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" : ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

/// Euclid's algorithm; `gcd(a, 0) == a`
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// GCD folded over a sequence. Zero for an empty or all-zero input.
pub fn gcd_all(values: &[u128]) -> u128 {
    values.iter().fold(0, |acc, &value| gcd(acc, value))
}

/// Reduce decimal ratios to a colon-separated integer ratio in lowest terms
pub fn simplify(ratios: &[Decimal], scaling: RatioScaling) -> Result<SimplifiedRatio> {
    if ratios.is_empty() {
        return Err(MixError::degenerate("no ratios to simplify"));
    }

    let scaled = scale_to_integers(ratios, scaling)?;
    if scaled.iter().any(|&term| term == 0) {
        return Err(MixError::degenerate("a ratio term is zero"));
    }

    let divisor = gcd_all(&scaled);
    Ok(SimplifiedRatio {
        terms: scaled.into_iter().map(|term| term / divisor).collect(),
    })
}

fn scale_to_integers(ratios: &[Decimal], scaling: RatioScaling) -> Result<Vec<u128>> {
    let magnitudes: Vec<Decimal> = ratios.iter().map(|r| r.abs()).collect();
    // an exact zero stays zero at any scale
    let has_zero = magnitudes.iter().any(|r| r.is_zero());

    match scaling {
        RatioScaling::Precision { max_decimals } => {
            let mut places = max_decimals.min(MAX_DECIMAL_SCALE);
            loop {
                let rounded: Vec<Decimal> = magnitudes
                    .iter()
                    .map(|r| {
                        r.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
                            .normalize()
                    })
                    .collect();

                if has_zero || places >= MAX_DECIMAL_SCALE || rounded.iter().all(|r| !r.is_zero())
                {
                    let decimals = rounded.iter().map(|r| r.scale()).max().unwrap_or(0);
                    let factor = power_of_ten(decimals)?;
                    return rounded.iter().map(|r| scale_term(*r, factor)).collect();
                }
                places += 1;
            }
        }
        RatioScaling::Fixed { multiplier } => {
            if multiplier == 0 {
                return Err(MixError::degenerate("fixed ratio multiplier is zero"));
            }

            let mut factor = u128::from(multiplier);
            for _ in 0..=MAX_DECIMAL_SCALE {
                let scaled = magnitudes
                    .iter()
                    .map(|r| scale_term(*r, factor))
                    .collect::<Result<Vec<u128>>>()?;
                if has_zero || scaled.iter().all(|&term| term != 0) {
                    return Ok(scaled);
                }
                factor = factor
                    .checked_mul(10)
                    .ok_or_else(|| MixError::overflow("ratio scale factor"))?;
            }
            Err(MixError::overflow("ratio scale factor"))
        }
    }
}

fn power_of_ten(exponent: u32) -> Result<u128> {
    10u128
        .checked_pow(exponent)
        .ok_or_else(|| MixError::overflow("ratio scale factor"))
}

/// `value * factor` rounded half away from zero, computed on the mantissa
fn scale_term(value: Decimal, factor: u128) -> Result<u128> {
    let mantissa = value.mantissa().unsigned_abs();
    let divisor = power_of_ten(value.scale())?;
    let product = mantissa
        .checked_mul(factor)
        .ok_or_else(|| MixError::overflow("scaled ratio term"))?;

    let (quotient, remainder) = (product / divisor, product % divisor);
    if remainder >= divisor - remainder {
        Ok(quotient + 1)
    } else {
        Ok(quotient)
    }
}
