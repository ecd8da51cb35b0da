//! Two-component alligation (cross rule)
//!
//! Each component's share is proportional to the target's distance from the
//! *other* component's intensity.

use crate::arith;
use crate::error::{MixError, Result};
use crate::ratio::RatioScaling;
use crate::strategy::{self, MixStrategy, Tolerance};
use crate::types::{MixRequest, MixResult, MixSolution, PairingStrategy};
use rust_decimal::Decimal;
use tracing::debug;

/// Cross-rule solver for exactly two components
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossRule {
    scaling: RatioScaling,
}

impl CrossRule {
    pub fn new(scaling: RatioScaling) -> Self {
        Self { scaling }
    }

    /// Raw cross ratios `(|a2 - m|, |m - a1|)`
    ///
    /// # Arguments
    /// * `a1`, `a2` - Component intensities
    /// * `m` - Desired average, strictly between `a1` and `a2`
    pub fn ratios(a1: Decimal, a2: Decimal, m: Decimal) -> Result<(Decimal, Decimal)> {
        let (min, max) = (a1.min(a2), a1.max(a2));
        if !(min < m && m < max) {
            return Err(MixError::OutOfRange {
                target: m,
                min,
                max,
            });
        }

        let ratio1 = arith::sub(a2, m, "cross ratio")?.abs();
        let ratio2 = arith::sub(m, a1, "cross ratio")?.abs();
        Ok((ratio1, ratio2))
    }

    /// Quantities of each component for `total` units averaging `m`
    pub fn solve_pair(
        &self,
        a1: Decimal,
        a2: Decimal,
        m: Decimal,
        total: Decimal,
    ) -> Result<MixSolution> {
        let (ratio1, ratio2) = Self::ratios(a1, a2, m)?;
        if total <= Decimal::ZERO {
            return Err(MixError::NonPositiveTotal { total });
        }

        debug!(%a1, %a2, %m, %total, %ratio1, %ratio2, "cross rule ratios");

        let request = MixRequest::from_intensities(&[a1, a2], m, total);
        strategy::settle(
            &request,
            vec![ratio1, ratio2],
            PairingStrategy::CrossRule,
            self.scaling,
            Tolerance::PAIR,
        )
    }
}

impl MixStrategy for CrossRule {
    fn cardinality(&self) -> usize {
        2
    }

    fn solve(&self, request: &MixRequest) -> Result<MixResult> {
        match request.components.as_slice() {
            [first, second] => self
                .solve_pair(
                    first.intensity,
                    second.intensity,
                    request.desired_average,
                    request.total_quantity,
                )
                .map(MixResult::Single),
            other => Err(MixError::UnsupportedCardinality { count: other.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cross_ratios() {
        let (r1, r2) = CrossRule::ratios(dec!(70), dec!(96), dec!(85)).unwrap();
        assert_eq!((r1, r2), (dec!(11), dec!(15)));

        // order of components does not matter for the magnitudes
        let (r1, r2) = CrossRule::ratios(dec!(96), dec!(70), dec!(85)).unwrap();
        assert_eq!((r1, r2), (dec!(15), dec!(11)));
    }

    #[test]
    fn test_pair_solution() {
        let solution = CrossRule::default()
            .solve_pair(dec!(70), dec!(96), dec!(85), dec!(230))
            .unwrap();

        assert!((solution.quantities[0] - dec!(97.31)).abs() < dec!(0.01));
        assert!((solution.quantities[1] - dec!(132.69)).abs() < dec!(0.01));
        assert!((solution.total_quantity - dec!(230)).abs() < dec!(0.001));
        assert_eq!(solution.simplified_ratio.to_string(), "11 : 15");
        assert_eq!(solution.strategy, PairingStrategy::CrossRule);
    }

    #[test]
    fn test_target_on_boundary_is_out_of_range() {
        for m in [dec!(70), dec!(96), dec!(100), dec!(10)] {
            let err = CrossRule::default()
                .solve_pair(dec!(70), dec!(96), m, dec!(230))
                .unwrap_err();
            assert_eq!(err.kind(), "out_of_range", "m = {}", m);
        }
    }

    #[test]
    fn test_non_positive_total() {
        let err = CrossRule::default()
            .solve_pair(dec!(70), dec!(96), dec!(85), dec!(0))
            .unwrap_err();
        assert_eq!(err, MixError::NonPositiveTotal { total: dec!(0) });
    }

    #[test]
    fn test_decimal_intensities() {
        let solution = CrossRule::default()
            .solve_pair(dec!(12.5), dec!(40), dec!(20), dec!(100))
            .unwrap();
        // ratios 20 : 7.5 -> 8 : 3
        assert_eq!(solution.simplified_ratio.to_string(), "8 : 3");
        assert!((solution.average_intensity - dec!(20)).abs() < dec!(0.001));
    }
}
