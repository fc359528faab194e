//! Optimal transport between weighted signatures.
//!
//! ## Core Types
//!
//! - [`Signature`] — a borrowed weighted point set being compared
//! - [`Flow`] — one edge of a transport plan
//! - [`Simplex`] — exact solver via the transportation simplex
//!
//! ## Traits
//!
//! - [`Measure`] — ground distance between source and target coordinates
//! - [`Coupling`] — a transport plan with a minimizable objective
//! - [`Support`] — marker for coordinate types of the ground space

mod coupling;
mod flow;
mod measure;
mod signature;
mod simplex;
mod support;

pub use coupling::*;
pub use flow::*;
pub use measure::*;
pub use signature::*;
pub use simplex::*;
pub use support::*;
