//! Strategy trait and the shared settle step
//!
//! Each strategy only decides raw ratios per component. Scaling to the
//! requested total, the self-checks and ratio simplification are common.

use crate::arith;
use crate::error::{MixError, Result};
use crate::ratio::{self, RatioScaling};
use crate::types::{MixRequest, MixResult, MixSolution, PairingStrategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Self-check tolerance for the two-component cross rule
pub const PAIR_TOLERANCE: Decimal = dec!(0.001);

/// Self-check tolerance for three and four components
pub const MIX_TOLERANCE: Decimal = dec!(0.01);

/// Allowed deviation of the realized total and average
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub total: Decimal,
    pub average: Decimal,
}

impl Tolerance {
    pub const PAIR: Tolerance = Tolerance {
        total: PAIR_TOLERANCE,
        average: PAIR_TOLERANCE,
    };

    pub const MIX: Tolerance = Tolerance {
        total: MIX_TOLERANCE,
        average: MIX_TOLERANCE,
    };
}

/// Unified interface over the fixed-size mixing strategies
pub trait MixStrategy {
    /// Number of components this strategy accepts
    fn cardinality(&self) -> usize;

    /// Solve a request whose target has already been range-checked
    fn solve(&self, request: &MixRequest) -> Result<MixResult>;

    fn supports(&self, request: &MixRequest) -> bool {
        request.components.len() == self.cardinality()
    }
}

/// Turn raw ratios (request order) into a checked solution
pub(crate) fn settle(
    request: &MixRequest,
    ratios: Vec<Decimal>,
    strategy: PairingStrategy,
    scaling: RatioScaling,
    tolerance: Tolerance,
) -> Result<MixSolution> {
    let quantities = arith::scale_to_total(&ratios, request.total_quantity)?;

    if let Some(index) = quantities.iter().position(|q| *q <= Decimal::ZERO) {
        return Err(MixError::InconsistentResult {
            message: format!("component {} received a non-positive quantity", index),
        });
    }

    let total_quantity = arith::sum(&quantities, "quantity sum")?;
    arith::ensure_within("total", total_quantity, request.total_quantity, tolerance.total)?;

    let average_intensity = arith::weighted_average(&request.intensities(), &quantities)?;
    arith::ensure_within(
        "average intensity",
        average_intensity,
        request.desired_average,
        tolerance.average,
    )?;

    let simplified_ratio = ratio::simplify(&ratios, scaling)?;

    Ok(MixSolution {
        quantities,
        ratios,
        simplified_ratio,
        strategy,
        average_intensity,
        total_quantity,
    })
}
