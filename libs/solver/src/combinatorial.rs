//! Four-component mixing by enumerating worse/better pairings
//!
//! With two components on each side of the target there are two one-to-one
//! pairings, and each may give its own valid mixture. All valid candidates
//! are returned; callers must not assume the answer is unique.

use crate::arith;
use crate::error::{MixError, Result};
use crate::partition::{restore_order, Partition, Ranked};
use crate::ratio::RatioScaling;
use crate::strategy::{self, MixStrategy, Tolerance};
use crate::types::{MixRequest, MixResult, MixSolution, PairingStrategy};
use rust_decimal::Decimal;
use tracing::debug;

/// Ratios for one pairing, as `(request index, ratio)`
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub strategy: PairingStrategy,
    pub ratios: Vec<(usize, Decimal)>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CombinatorialPairing {
    scaling: RatioScaling,
}

impl CombinatorialPairing {
    pub fn new(scaling: RatioScaling) -> Self {
        Self { scaling }
    }

    /// Enumerate the pairings available for this worse/better split
    pub fn candidates(partition: &Partition) -> Result<Vec<Candidate>> {
        let target = partition.target;
        let (worse, better) = (&partition.worse, &partition.better);

        match partition.shape() {
            (2, 2) => Ok(vec![
                Candidate {
                    strategy: PairingStrategy::DirectPairing,
                    ratios: pair_ratios(&[(worse[0], better[0]), (worse[1], better[1])], target)?,
                },
                Candidate {
                    strategy: PairingStrategy::CrossPairing,
                    ratios: pair_ratios(&[(worse[0], better[1]), (worse[1], better[0])], target)?,
                },
            ]),
            (3, 1) => Ok(vec![Candidate {
                strategy: PairingStrategy::ThreeWorseOneBetter,
                ratios: one_against_many(better[0], worse, target)?,
            }]),
            (1, 3) => Ok(vec![Candidate {
                strategy: PairingStrategy::OneWorseThreeBetter,
                ratios: one_against_many(worse[0], better, target)?,
            }]),
            (w, b) => Err(MixError::no_solution(format!(
                "{} components below and {} above the target cannot be paired",
                w, b
            ))),
        }
    }

    /// Every valid, distinct solution for a four-component request
    pub fn solve_all(&self, request: &MixRequest) -> Result<Vec<MixSolution>> {
        let partition = Partition::split(&request.components, request.desired_average)?;
        let candidates = Self::candidates(&partition)?;

        let mut solutions: Vec<MixSolution> = Vec::with_capacity(candidates.len());
        let mut last_rejection = None;

        for candidate in candidates {
            match self.evaluate(request, &candidate) {
                Ok(solution) => {
                    if solutions.iter().any(|s| s.quantities == solution.quantities) {
                        debug!(strategy = %candidate.strategy, "duplicate pairing solution dropped");
                        continue;
                    }
                    solutions.push(solution);
                }
                Err(e) => {
                    debug!(strategy = %candidate.strategy, error = %e, "pairing rejected");
                    last_rejection = Some(e);
                }
            }
        }

        if solutions.is_empty() {
            let reason = last_rejection
                .map(|e| format!("every pairing was rejected ({})", e))
                .unwrap_or_else(|| "no pairing candidates".to_string());
            return Err(MixError::no_solution(reason));
        }

        Ok(solutions)
    }

    /// Check one candidate: strictly positive ratios, then the shared
    /// total/average self-checks
    pub fn evaluate(&self, request: &MixRequest, candidate: &Candidate) -> Result<MixSolution> {
        if let Some((index, ratio)) = candidate.ratios.iter().find(|(_, r)| *r <= Decimal::ZERO) {
            return Err(MixError::degenerate(format!(
                "component {} has non-positive ratio {} under {}",
                index, ratio, candidate.strategy
            )));
        }

        let ratios = restore_order(request.components.len(), &candidate.ratios);
        strategy::settle(
            request,
            ratios,
            candidate.strategy,
            self.scaling,
            Tolerance::MIX,
        )
    }
}

impl MixStrategy for CombinatorialPairing {
    fn cardinality(&self) -> usize {
        4
    }

    fn solve(&self, request: &MixRequest) -> Result<MixResult> {
        self.solve_all(request).map(MixResult::Multiple)
    }
}

/// Each side of a pair is weighted by its counterpart's distance from target
fn pair_ratios(pairs: &[(Ranked, Ranked)], target: Decimal) -> Result<Vec<(usize, Decimal)>> {
    let mut ratios = Vec::with_capacity(pairs.len() * 2);
    for (w, b) in pairs {
        ratios.push((w.index, arith::sub(b.intensity, target, "pair ratio")?.abs()));
        ratios.push((b.index, arith::sub(w.intensity, target, "pair ratio")?.abs()));
    }
    Ok(ratios)
}

/// The lone component balances the whole opposite group; each member of the
/// group is weighted by the lone component's distance from target
fn one_against_many(
    lone: Ranked,
    group: &[Ranked],
    target: Decimal,
) -> Result<Vec<(usize, Decimal)>> {
    let lone_distance = arith::sub(lone.intensity, target, "lone distance")?.abs();

    let mut group_pull = Decimal::ZERO;
    let mut ratios = Vec::with_capacity(group.len() + 1);
    for member in group {
        let distance = arith::sub(member.intensity, target, "group distance")?.abs();
        group_pull = arith::add(group_pull, distance, "group pull")?;
        ratios.push((member.index, lone_distance));
    }
    ratios.push((lone.index, group_pull));
    Ok(ratios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(values: &[Decimal], target: Decimal) -> MixRequest {
        MixRequest::from_intensities(values, target, dec!(100))
    }

    #[test]
    fn test_two_by_two_yields_both_pairings() {
        let request = request(&[dec!(70), dec!(80), dec!(90), dec!(96)], dec!(85));
        let solutions = CombinatorialPairing::default().solve_all(&request).unwrap();

        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].strategy, PairingStrategy::DirectPairing);
        // 70<->90, 80<->96
        assert_eq!(
            solutions[0].ratios,
            vec![dec!(5), dec!(11), dec!(15), dec!(5)]
        );
        assert_eq!(solutions[1].strategy, PairingStrategy::CrossPairing);
        // 70<->96, 80<->90
        assert_eq!(
            solutions[1].ratios,
            vec![dec!(11), dec!(5), dec!(5), dec!(15)]
        );
        for solution in &solutions {
            assert!((solution.average_intensity - dec!(85)).abs() < dec!(0.01));
            assert!((solution.total_quantity - dec!(100)).abs() < dec!(0.01));
        }
    }

    #[test]
    fn test_identical_pairings_collapse() {
        // equal intensities on each side make both pairings the same mixture
        let request = request(&[dec!(70), dec!(70), dec!(96), dec!(96)], dec!(85));
        let solutions = CombinatorialPairing::default().solve_all(&request).unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].simplified_ratio.to_string(), "11 : 11 : 15 : 15");
    }

    #[test]
    fn test_three_worse_one_better() {
        let request = request(&[dec!(60), dec!(70), dec!(80), dec!(100)], dec!(85));
        let solutions = CombinatorialPairing::default().solve_all(&request).unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].strategy, PairingStrategy::ThreeWorseOneBetter);
        // worse: 100-85 = 15 each; better: 25+15+5 = 45
        assert_eq!(
            solutions[0].ratios,
            vec![dec!(15), dec!(15), dec!(15), dec!(45)]
        );
        assert_eq!(solutions[0].simplified_ratio.to_string(), "1 : 1 : 1 : 3");
    }

    #[test]
    fn test_one_worse_three_better() {
        let request = request(&[dec!(95), dec!(70), dec!(90), dec!(100)], dec!(85));
        let solutions = CombinatorialPairing::default().solve_all(&request).unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].strategy, PairingStrategy::OneWorseThreeBetter);
        // better: 85-70 = 15 each; worse: 10+5+15 = 30
        assert_eq!(
            solutions[0].ratios,
            vec![dec!(15), dec!(30), dec!(15), dec!(15)]
        );
    }

    #[test]
    fn test_one_sided_split_has_no_solution() {
        let request = request(&[dec!(10), dec!(20), dec!(30), dec!(40)], dec!(50));
        let err = CombinatorialPairing::default().solve_all(&request).unwrap_err();
        assert_eq!(err.kind(), "no_valid_solution");
    }

    #[test]
    fn test_non_positive_ratio_rejects_candidate() {
        let request = request(&[dec!(70), dec!(80), dec!(90), dec!(96)], dec!(85));
        let candidate = Candidate {
            strategy: PairingStrategy::DirectPairing,
            ratios: vec![(0, dec!(5)), (1, dec!(0)), (2, dec!(15)), (3, dec!(5))],
        };
        let err = CombinatorialPairing::default()
            .evaluate(&request, &candidate)
            .unwrap_err();
        assert_eq!(err.kind(), "degenerate_ratio");
    }

    #[test]
    fn test_unbalanced_candidate_fails_average_check() {
        let request = request(&[dec!(70), dec!(80), dec!(90), dec!(96)], dec!(85));
        let candidate = Candidate {
            strategy: PairingStrategy::CrossPairing,
            ratios: vec![(0, dec!(1)), (1, dec!(1)), (2, dec!(1)), (3, dec!(1))],
        };
        let err = CombinatorialPairing::default()
            .evaluate(&request, &candidate)
            .unwrap_err();
        assert_eq!(err.kind(), "inconsistent_result");
    }
}
