//! Response payloads
//!
//! Converts solver output into the JSON shapes the client renders:
//! raw quantities as numbers, 2-decimal strings for display, percentages
//! and the simplified ratio.

use crate::schema::MixType;
use alligo_solver::{MixRequest, MixResult, MixSolution, PairingStrategy};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::Value;

/// `POST /api/mix/simple` success body
#[derive(Debug, Clone, Serialize)]
pub struct SimpleMixResponse {
    pub quantities: Vec<f64>,
    pub quantities_formatted: Vec<String>,
    pub simplified_ratio: String,
}

impl From<&MixSolution> for SimpleMixResponse {
    fn from(solution: &MixSolution) -> Self {
        Self {
            quantities: solution.quantities.iter().copied().map(to_f64).collect(),
            quantities_formatted: solution.quantities.iter().copied().map(format_2dp).collect(),
            simplified_ratio: solution.simplified_ratio.to_string(),
        }
    }
}

/// Per-component line of a complex mix
#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    pub name: String,
    pub intensity: f64,
    pub quantity: f64,
    pub quantity_formatted: String,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
}

/// One solution of a complex mix
#[derive(Debug, Clone, Serialize)]
pub struct SolutionView {
    pub pairing_strategy: PairingStrategy,
    pub components: Vec<ComponentView>,
    pub quantities: Vec<f64>,
    pub quantities_formatted: Vec<String>,
    pub ratios: Vec<f64>,
    pub simplified_ratio: String,
    pub average_intensity: f64,
}

impl SolutionView {
    pub fn new(request: &MixRequest, solution: &MixSolution) -> Self {
        let components = request
            .components
            .iter()
            .zip(&solution.quantities)
            .enumerate()
            .map(|(i, (component, quantity))| ComponentView {
                name: component
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Component {}", i + 1)),
                intensity: to_f64(component.intensity),
                quantity: to_f64(*quantity),
                quantity_formatted: format_2dp(*quantity),
                percentage: solution.percentage(i).map(round_2dp).unwrap_or(0.0),
                priority: component.priority.clone(),
            })
            .collect();

        Self {
            pairing_strategy: solution.strategy,
            components,
            quantities: solution.quantities.iter().copied().map(to_f64).collect(),
            quantities_formatted: solution.quantities.iter().copied().map(format_2dp).collect(),
            ratios: solution.ratios.iter().copied().map(to_f64).collect(),
            simplified_ratio: solution.simplified_ratio.to_string(),
            average_intensity: round_2dp(solution.average_intensity),
        }
    }
}

/// All candidate pairings of a four-component mix
#[derive(Debug, Clone, Serialize)]
pub struct MethodDetails {
    pub all_solutions: Vec<SolutionView>,
    pub valid_solutions_count: usize,
}

/// `POST /api/mix/complex` success body
///
/// A single solution is flattened into the top level. Four-component
/// requests also carry `method_details`; when more than one pairing is
/// valid the solutions appear only there.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexMixResponse {
    pub mix_type: MixType,
    pub total_amount: f64,
    pub desired_intensity: f64,
    #[serde(flatten)]
    pub solution: Option<SolutionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_details: Option<MethodDetails>,
}

impl ComplexMixResponse {
    pub fn new(request: &MixRequest, result: &MixResult, mix_type: MixType) -> Self {
        let views: Vec<SolutionView> = result
            .solutions()
            .iter()
            .map(|s| SolutionView::new(request, s))
            .collect();

        let (solution, method_details) = match result {
            MixResult::Single(_) => (views.into_iter().next(), None),
            MixResult::Multiple(_) => {
                let single = if views.len() == 1 {
                    views.first().cloned()
                } else {
                    None
                };
                let details = MethodDetails {
                    valid_solutions_count: views.len(),
                    all_solutions: views,
                };
                (single, Some(details))
            }
        };

        Self {
            mix_type,
            total_amount: to_f64(request.total_quantity),
            desired_intensity: to_f64(request.desired_average),
            solution,
            method_details,
        }
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn round_2dp(value: Decimal) -> f64 {
    to_f64(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Two decimal places, half away from zero: `97.3076..` -> `"97.31"`
pub fn format_2dp(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
