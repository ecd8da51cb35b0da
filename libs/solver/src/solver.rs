//! Entry point: validates a request and dispatches on component count

use crate::combinatorial::CombinatorialPairing;
use crate::error::{MixError, Result};
use crate::pairing::SimplePairing;
use crate::ratio::RatioScaling;
use crate::strategy::MixStrategy;
use crate::two_component::CrossRule;
use crate::types::{MixRequest, MixResult, MixSolution};
use rust_decimal::Decimal;
use tracing::debug;

/// Smallest supported mixture
pub const MIN_COMPONENTS: usize = 2;

/// Largest supported mixture
pub const MAX_COMPONENTS: usize = 4;

/// Configuration for the solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// How ratios are lifted to integers before GCD reduction
    pub scaling: RatioScaling,
}

/// Stateless mixture solver. Cheap to clone and safe to share between
/// request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixSolver {
    config: SolverConfig,
    cross_rule: CrossRule,
    simple: SimplePairing,
    combinatorial: CombinatorialPairing,
}

impl MixSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            cross_rule: CrossRule::new(config.scaling),
            simple: SimplePairing::new(config.scaling),
            combinatorial: CombinatorialPairing::new(config.scaling),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a 2, 3 or 4 component request
    ///
    /// Returns one solution for two or three components and the set of valid
    /// pairings for four.
    pub fn solve(&self, request: &MixRequest) -> Result<MixResult> {
        let count = request.components.len();
        let strategy: &dyn MixStrategy = match count {
            2 => &self.cross_rule,
            3 => &self.simple,
            4 => &self.combinatorial,
            _ => return Err(MixError::UnsupportedCardinality { count }),
        };

        if request.total_quantity <= Decimal::ZERO {
            return Err(MixError::NonPositiveTotal {
                total: request.total_quantity,
            });
        }

        check_target(request)?;

        debug!(
            components = count,
            target = %request.desired_average,
            total = %request.total_quantity,
            "solving mixture"
        );

        let result = strategy.solve(request)?;
        debug!(solutions = result.len(), "mixture solved");
        Ok(result)
    }

    /// Two-component shortcut used by the simple endpoint
    pub fn solve_pair(
        &self,
        a1: Decimal,
        a2: Decimal,
        m: Decimal,
        total: Decimal,
    ) -> Result<MixSolution> {
        self.cross_rule.solve_pair(a1, a2, m, total)
    }
}

/// The target must sit strictly inside the intensity range. Touching either
/// end is out of range for every size; lying wholly outside it leaves a four
/// component mix with no pairing at all.
fn check_target(request: &MixRequest) -> Result<()> {
    let target = request.desired_average;
    let intensities = request.intensities();
    let (Some(min), Some(max)) = (
        intensities.iter().copied().min(),
        intensities.iter().copied().max(),
    ) else {
        return Err(MixError::UnsupportedCardinality { count: 0 });
    };

    if min < target && target < max {
        return Ok(());
    }

    if target != min && target != max && intensities.len() == MAX_COMPONENTS {
        let side = if target > max { "below" } else { "above" };
        return Err(MixError::no_solution(format!(
            "all {} components lie {} the target {}",
            MAX_COMPONENTS, side, target
        )));
    }

    Err(MixError::OutOfRange { target, min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Component;
    use rust_decimal_macros::dec;

    fn request(values: &[Decimal], target: Decimal) -> MixRequest {
        MixRequest::from_intensities(values, target, dec!(230))
    }

    #[test]
    fn test_dispatch_by_count() {
        let solver = MixSolver::default();

        let two = solver.solve(&request(&[dec!(70), dec!(96)], dec!(85))).unwrap();
        assert!(matches!(two, MixResult::Single(_)));

        let three = solver
            .solve(&request(&[dec!(70), dec!(80), dec!(96)], dec!(85)))
            .unwrap();
        assert!(matches!(three, MixResult::Single(_)));

        let four = solver
            .solve(&request(&[dec!(70), dec!(80), dec!(90), dec!(96)], dec!(85)))
            .unwrap();
        assert!(matches!(four, MixResult::Multiple(ref s) if s.len() == 2));
    }

    #[test]
    fn test_unsupported_cardinality() {
        let solver = MixSolver::default();
        for values in [
            vec![dec!(70)],
            vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)],
            vec![],
        ] {
            let err = solver.solve(&request(&values, dec!(3))).unwrap_err();
            assert_eq!(err.kind(), "unsupported_cardinality");
        }
    }

    #[test]
    fn test_boundary_target_is_out_of_range_for_every_size() {
        let solver = MixSolver::default();
        let cases: [&[Decimal]; 3] = [
            &[dec!(70), dec!(96)],
            &[dec!(70), dec!(80), dec!(96)],
            &[dec!(70), dec!(80), dec!(90), dec!(96)],
        ];
        for values in cases {
            for target in [dec!(70), dec!(96)] {
                let err = solver.solve(&request(values, target)).unwrap_err();
                assert_eq!(err.kind(), "out_of_range");
            }
        }
    }

    #[test]
    fn test_outside_range() {
        let solver = MixSolver::default();

        let err = solver
            .solve(&request(&[dec!(70), dec!(80), dec!(96)], dec!(99)))
            .unwrap_err();
        assert_eq!(err.kind(), "out_of_range");

        let err = solver
            .solve(&request(&[dec!(70), dec!(80), dec!(90), dec!(96)], dec!(99)))
            .unwrap_err();
        assert_eq!(err.kind(), "no_valid_solution");
        assert!(err.to_string().contains("below"));
    }

    #[test]
    fn test_total_must_be_positive() {
        let solver = MixSolver::default();
        let request = MixRequest::from_intensities(&[dec!(70), dec!(96)], dec!(85), dec!(-5));
        let err = solver.solve(&request).unwrap_err();
        assert_eq!(err, MixError::NonPositiveTotal { total: dec!(-5) });
    }

    #[test]
    fn test_metadata_does_not_affect_result() {
        let solver = MixSolver::default();
        let plain = request(&[dec!(70), dec!(80), dec!(96)], dec!(85));
        let mut named = plain.clone();
        named.components = vec![
            Component::named(dec!(70), "low"),
            Component::named(dec!(80), "mid"),
            Component {
                intensity: dec!(96),
                name: None,
                priority: Some(serde_json::json!(3)),
            },
        ];

        assert_eq!(solver.solve(&plain).unwrap(), solver.solve(&named).unwrap());
    }
}
