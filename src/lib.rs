//! Earth Mover's Distance between weighted one-dimensional signatures.
//!
//! A signature is a set of features (coordinates on the real line) paired
//! with non-negative masses. This crate computes the minimum total cost of
//! transforming one signature into the other under a pluggable ground
//! distance, and optionally reports the optimal mass-transport flows.
//!
//! ## Module Organization
//!
//! - [`marshal`] — the host boundary: duck-typed sequence validation,
//!   signature assembly, flow-buffer sizing, and result marshalling
//! - [`transport`] — the optimal transport layer: ground metrics, transport
//!   plans, and the exact transportation-simplex solver
//!
//! ## Usage
//!
//! The scalar surface is [`emd`]; the keyword-addressable surface is
//! [`Query`], whose `return_flows` flag selects between the scalar and the
//! flow-carrying arities of [`Outcome`].

pub mod marshal;
pub mod transport;

pub use marshal::*;
pub use transport::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Coordinates in the ground metric space, one-dimensional here.
pub type Feature = f64;
/// Non-negative point masses and transported amounts.
pub type Mass = f64;
/// Ground costs and transport objectives.
pub type Distance = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarks.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// TRANSPORTATION SIMPLEX
// ============================================================================
/// Hard cap on pivots before the solver accepts the incumbent plan.
pub const SIMPLEX_ITERATIONS: usize = 4096;
/// Reduced-cost and mass tolerance for optimality and flow emission.
pub const SIMPLEX_TOLERANCE: f64 = 1e-9;
/// Ground cost charged per unit of unmatched mass when totals differ.
pub const IMBALANCE_COST: Distance = 1.0;
