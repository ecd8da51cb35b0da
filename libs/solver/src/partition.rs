//! Worse/better split of components around the target intensity

use crate::error::{MixError, Result};
use crate::types::Component;
use rust_decimal::Decimal;

/// A component's intensity tagged with its position in the request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub intensity: Decimal,
}

/// Components below (`worse`) and above (`better`) the target, each sorted
/// by ascending intensity
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub target: Decimal,
    pub worse: Vec<Ranked>,
    pub better: Vec<Ranked>,
}

impl Partition {
    /// Split `components` around `target`. A component sitting exactly on
    /// the target is ambiguous and rejected.
    pub fn split(components: &[Component], target: Decimal) -> Result<Self> {
        let mut ranked: Vec<Ranked> = components
            .iter()
            .enumerate()
            .map(|(index, c)| Ranked {
                index,
                intensity: c.intensity,
            })
            .collect();
        ranked.sort_by(|a, b| a.intensity.cmp(&b.intensity).then(a.index.cmp(&b.index)));

        if let Some(equal) = ranked.iter().find(|r| r.intensity == target) {
            return Err(MixError::AmbiguousTarget {
                target,
                index: equal.index,
            });
        }

        let (worse, better): (Vec<Ranked>, Vec<Ranked>) =
            ranked.into_iter().partition(|r| r.intensity < target);

        Ok(Self {
            target,
            worse,
            better,
        })
    }

    /// (worse count, better count)
    pub fn shape(&self) -> (usize, usize) {
        (self.worse.len(), self.better.len())
    }

    pub fn len(&self) -> usize {
        self.worse.len() + self.better.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Place per-component values computed in ranked order back into request
/// order
pub(crate) fn restore_order(len: usize, values: &[(usize, Decimal)]) -> Vec<Decimal> {
    let mut ordered = vec![Decimal::ZERO; len];
    for &(index, value) in values {
        if let Some(slot) = ordered.get_mut(index) {
            *slot = value;
        }
    }
    ordered
}
