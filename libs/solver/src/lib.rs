//! # Alligo Solver - Exact Mixture-Ratio Mathematics
//!
//! ## Purpose
//!
//! Pure library that answers the alligation question: given components of
//! known intensity, how much of each is needed to hit a target average
//! intensity at a requested total quantity. Results are quantities in the
//! caller's component order plus an integer ratio in lowest terms.
//!
//! ## Integration Points
//!
//! - **Input**: a validated [`MixRequest`] (2, 3 or 4 components) or the
//!   bare two-component form via [`MixSolver::solve_pair`]
//! - **Output**: [`MixResult`], a single [`MixSolution`] or every valid
//!   pairing for four components
//! - **Errors**: [`MixError`] with a stable `kind()` code per failure
//!
//! ## Architecture Role
//!
//! Framework-agnostic core behind the mix API service. No I/O, no shared
//! state: one [`MixSolver`] value can serve any number of concurrent
//! requests.
//!
//! ## Strategies
//!
//! - **2 components**: cross rule, [`CrossRule`]
//! - **3 components**: simple pairing, [`SimplePairing`]
//! - **4 components**: pairing enumeration, [`CombinatorialPairing`]
//!
//! ## Precision
//!
//! All arithmetic is `Decimal` with checked operations; overflow is
//! reported as an inconsistent result instead of panicking. Simplified
//! ratios are exact by default and never contain a zero term for a
//! non-zero ratio.
//!
//! See [`architecture_diagram()`] for the data flow.

mod arith;
pub mod combinatorial;
pub mod error;
pub mod pairing;
pub mod partition;
pub mod ratio;
pub mod solver;
pub mod strategy;
pub mod two_component;
pub mod types;

pub use combinatorial::CombinatorialPairing;
pub use error::{MixError, Result};
pub use pairing::SimplePairing;
pub use partition::Partition;
pub use ratio::{gcd, simplify, RatioScaling, SimplifiedRatio, MAX_DECIMAL_SCALE};
pub use solver::{MixSolver, SolverConfig};
pub use strategy::{MixStrategy, Tolerance};
pub use two_component::CrossRule;
pub use types::{Component, MixRequest, MixResult, MixSolution, PairingStrategy};

/// Common types for mixture calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Architecture diagram showing solver data flow
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph LR
///     subgraph Input["Request"]
///         CI[Component Intensities]
///         TA[Target Average]
///         TQ[Total Quantity]
///     end
///
///     subgraph Validate["Validation"]
///         CC[Cardinality 2..4]
///         RG[Strict Range Check]
///     end
///
///     subgraph Solve["Strategies"]
///         CR[Cross Rule]
///         SP[Simple Pairing]
///         CP[Pairing Enumeration]
///     end
///
///     subgraph Output["Result"]
///         SC[Self-checks]
///         QT[Quantities]
///         SR[Simplified Ratio]
///     end
///
///     CI --> CC
///     TA --> RG
///     TQ --> RG
///     CC --> CR
///     CC --> SP
///     CC --> CP
///     RG --> CR
///     RG --> SP
///     RG --> CP
///     CR --> SC
///     SP --> SC
///     CP --> SC
///     SC --> QT
///     SC --> SR
///
///     style Input fill:#e1f5fe
///     style Validate fill:#fff3e0
///     style Solve fill:#f3e5f5
///     style Output fill:#e8f5e9
/// ```
pub fn architecture_diagram() {
    // This function exists solely for documentation purposes
    // The diagram is rendered by aquamarine in rustdoc
}
