use crate::Mass;
use serde::Deserialize;
use serde::Serialize;

/// One edge of a transport plan.
///
/// `from` indexes a point of the source signature, `to` a point of the
/// target, and `amount` is the mass moved along the edge. Flows are emitted
/// in solver order and never reordered or deduplicated downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub from: usize,
    pub to: usize,
    pub amount: Mass,
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({:.4})", self.from, self.to, self.amount)
    }
}
