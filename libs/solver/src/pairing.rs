//! Simple pairing: alligation generalized past two components
//!
//! Every worse component is weighted by the total pull of the better group
//! above the target, and every better component by the total pull of the
//! worse group below it. With one component on each side this reduces to
//! the cross rule.

use crate::arith;
use crate::error::{MixError, Result};
use crate::partition::{restore_order, Partition};
use crate::ratio::RatioScaling;
use crate::strategy::{self, MixStrategy, Tolerance};
use crate::types::{MixRequest, MixResult, MixSolution, PairingStrategy};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePairing {
    scaling: RatioScaling,
}

impl SimplePairing {
    pub fn new(scaling: RatioScaling) -> Self {
        Self { scaling }
    }

    /// Raw ratio per component as `(request index, ratio)`, in ranked order
    pub fn raw_ratios(partition: &Partition) -> Result<Vec<(usize, Decimal)>> {
        let target = partition.target;

        let mut better_pull = Decimal::ZERO;
        for b in &partition.better {
            better_pull = arith::add(
                better_pull,
                arith::sub(b.intensity, target, "better pull")?,
                "better pull",
            )?;
        }

        let mut worse_pull = Decimal::ZERO;
        for w in &partition.worse {
            worse_pull = arith::add(
                worse_pull,
                arith::sub(target, w.intensity, "worse pull")?,
                "worse pull",
            )?;
        }

        let mut ratios = Vec::with_capacity(partition.len());
        ratios.extend(partition.worse.iter().map(|w| (w.index, better_pull)));
        ratios.extend(partition.better.iter().map(|b| (b.index, worse_pull)));
        Ok(ratios)
    }

    pub fn solve_mix(&self, request: &MixRequest) -> Result<MixSolution> {
        let partition = Partition::split(&request.components, request.desired_average)?;
        let ranked = Self::raw_ratios(&partition)?;

        if ranked.iter().all(|(_, r)| r.is_zero()) {
            return Err(MixError::degenerate("all pairing ratios are zero"));
        }

        debug!(
            worse = partition.worse.len(),
            better = partition.better.len(),
            "simple pairing ratios: {:?}",
            ranked
        );

        let ratios = restore_order(request.components.len(), &ranked);
        strategy::settle(
            request,
            ratios,
            PairingStrategy::SimplePairing,
            self.scaling,
            Tolerance::MIX,
        )
    }
}

impl MixStrategy for SimplePairing {
    fn cardinality(&self) -> usize {
        3
    }

    fn solve(&self, request: &MixRequest) -> Result<MixResult> {
        self.solve_mix(request).map(MixResult::Single)
    }
}
