use super::support::Support;
use crate::Distance;
use crate::Feature;

/// Ground metric between coordinates of two support spaces.
///
/// Defines the cost of transporting one unit of mass from a point in the
/// source space to a point in the target space. This is the "ground cost"
/// the solver minimizes over; the transport objective is the integral of
/// flow times ground distance.
///
/// `X` and `Y` are usually the same type, but the trait supports
/// heterogeneous problems where source and target live in different spaces.
pub trait Measure {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Returns the cost of transporting mass from `x` to `y`.
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance;
}

/// Absolute difference on the real line.
///
/// The canonical ground distance for one-dimensional signatures; under it
/// the transport objective is the Wasserstein-1 distance.
pub struct Absolute;

impl Measure for Absolute {
    type X = Feature;
    type Y = Feature;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Distance {
        (x - y).abs()
    }
}
