/// Marker trait for coordinate types of the ground metric space.
///
/// The support of a signature is the set of points carrying positive mass.
/// The `Clone` bound enables copying coordinates when assembling transport
/// plans.
pub trait Support: Clone {}

/// f64 implements Support as the one-dimensional real line.
impl Support for f64 {}
