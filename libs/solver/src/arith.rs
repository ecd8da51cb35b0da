//! Checked decimal helpers shared by the strategies
//!
//! Decimal panics on overflow, so every operation on caller-derived values
//! goes through these and surfaces overflow as an inconsistent result.

use crate::error::{MixError, Result};
use rust_decimal::Decimal;

pub(crate) fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| MixError::overflow(what))
}

pub(crate) fn sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| MixError::overflow(what))
}

pub(crate) fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| MixError::overflow(what))
}

pub(crate) fn sum(values: &[Decimal], what: &str) -> Result<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, &v| add(acc, v, what))
}

/// Scale raw ratios so that they sum to `total`: `k = total / Σratios`,
/// `quantity_i = ratio_i * k`
pub(crate) fn scale_to_total(ratios: &[Decimal], total: Decimal) -> Result<Vec<Decimal>> {
    let ratio_sum = sum(ratios, "ratio sum")?;
    if ratio_sum.is_zero() {
        return Err(MixError::degenerate("ratio sum is zero"));
    }
    let k = total
        .checked_div(ratio_sum)
        .ok_or_else(|| MixError::overflow("scale factor"))?;
    ratios.iter().map(|&r| mul(r, k, "quantity")).collect()
}

/// Σ(intensity·quantity) / Σquantity
pub(crate) fn weighted_average(intensities: &[Decimal], quantities: &[Decimal]) -> Result<Decimal> {
    let mut weighted = Decimal::ZERO;
    for (&intensity, &quantity) in intensities.iter().zip(quantities) {
        weighted = add(weighted, mul(intensity, quantity, "weighted sum")?, "weighted sum")?;
    }
    let total = sum(quantities, "quantity sum")?;
    if total.is_zero() {
        return Err(MixError::degenerate("quantities sum to zero"));
    }
    weighted
        .checked_div(total)
        .ok_or_else(|| MixError::overflow("weighted average"))
}

/// Self-check of a realized value against what was requested
pub(crate) fn ensure_within(
    check: &str,
    actual: Decimal,
    expected: Decimal,
    tolerance: Decimal,
) -> Result<()> {
    let deviation = sub(actual, expected, check)?.abs();
    if deviation > tolerance {
        return Err(MixError::InconsistentResult {
            message: format!(
                "{} computed {}, expected {} (tolerance {})",
                check,
                actual.round_dp(4),
                expected,
                tolerance
            ),
        });
    }
    Ok(())
}
