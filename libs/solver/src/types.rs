//! Request and result types shared by all mixture strategies

use crate::ratio::SimplifiedRatio;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient of a mixture
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub intensity: Decimal,
    pub name: Option<String>,
    /// Opaque caller value, returned untouched
    pub priority: Option<serde_json::Value>,
}

impl Component {
    pub fn new(intensity: Decimal) -> Self {
        Self {
            intensity,
            name: None,
            priority: None,
        }
    }

    pub fn named(intensity: Decimal, name: impl Into<String>) -> Self {
        Self {
            intensity,
            name: Some(name.into()),
            priority: None,
        }
    }
}

/// Validated input to the solver
#[derive(Debug, Clone, PartialEq)]
pub struct MixRequest {
    pub components: Vec<Component>,
    pub desired_average: Decimal,
    pub total_quantity: Decimal,
}

impl MixRequest {
    pub fn new(components: Vec<Component>, desired_average: Decimal, total_quantity: Decimal) -> Self {
        Self {
            components,
            desired_average,
            total_quantity,
        }
    }

    /// Build a request from bare intensities, in order
    pub fn from_intensities(
        intensities: &[Decimal],
        desired_average: Decimal,
        total_quantity: Decimal,
    ) -> Self {
        Self::new(
            intensities.iter().copied().map(Component::new).collect(),
            desired_average,
            total_quantity,
        )
    }

    pub fn intensities(&self) -> Vec<Decimal> {
        self.components.iter().map(|c| c.intensity).collect()
    }
}

/// How worse and better components were associated to derive ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    /// Two components, classic alligation cross
    CrossRule,
    /// Every worse component balanced against every better one
    SimplePairing,
    /// Four components: worse[0]<->better[0], worse[1]<->better[1]
    DirectPairing,
    /// Four components: worse[0]<->better[1], worse[1]<->better[0]
    CrossPairing,
    ThreeWorseOneBetter,
    OneWorseThreeBetter,
}

impl PairingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairingStrategy::CrossRule => "cross_rule",
            PairingStrategy::SimplePairing => "simple_pairing",
            PairingStrategy::DirectPairing => "direct_pairing",
            PairingStrategy::CrossPairing => "cross_pairing",
            PairingStrategy::ThreeWorseOneBetter => "three_worse_one_better",
            PairingStrategy::OneWorseThreeBetter => "one_worse_three_better",
        }
    }
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate mixture, in the caller's component order
#[derive(Debug, Clone, PartialEq)]
pub struct MixSolution {
    pub quantities: Vec<Decimal>,
    pub ratios: Vec<Decimal>,
    pub simplified_ratio: SimplifiedRatio,
    pub strategy: PairingStrategy,
    /// Weighted average realized by `quantities`
    pub average_intensity: Decimal,
    /// Sum of `quantities`
    pub total_quantity: Decimal,
}

impl MixSolution {
    /// Share of the total held by component `index`, in percent
    pub fn percentage(&self, index: usize) -> Option<Decimal> {
        let quantity = *self.quantities.get(index)?;
        if self.total_quantity.is_zero() {
            return None;
        }
        quantity
            .checked_div(self.total_quantity)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Solver output: one solution, or every valid pairing for four components
#[derive(Debug, Clone, PartialEq)]
pub enum MixResult {
    Single(MixSolution),
    Multiple(Vec<MixSolution>),
}

impl MixResult {
    pub fn solutions(&self) -> &[MixSolution] {
        match self {
            MixResult::Single(solution) => std::slice::from_ref(solution),
            MixResult::Multiple(solutions) => solutions,
        }
    }

    pub fn len(&self) -> usize {
        self.solutions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions().is_empty()
    }

    /// First solution; every constructed result holds at least one
    pub fn primary(&self) -> Option<&MixSolution> {
        self.solutions().first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strategy_serializes_snake_case() {
        let json = serde_json::to_string(&PairingStrategy::ThreeWorseOneBetter).unwrap();
        assert_eq!(json, "\"three_worse_one_better\"");
        assert_eq!(PairingStrategy::CrossPairing.to_string(), "cross_pairing");
    }

    #[test]
    fn test_request_from_intensities_keeps_order() {
        let request = MixRequest::from_intensities(&[dec!(96), dec!(70)], dec!(85), dec!(230));
        assert_eq!(request.intensities(), vec![dec!(96), dec!(70)]);
        assert!(request.components.iter().all(|c| c.name.is_none()));
    }
}
