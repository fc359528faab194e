use crate::transport::Flow;
use crate::Distance;
use serde::Deserialize;
use serde::Serialize;

/// Caller-facing result of one distance query.
///
/// The `return_flows` flag changes the advertised arity, so the two shapes
/// are a tagged sum rather than a runtime-varying return: the scalar
/// distance alone, or the distance plus every emitted flow in solver order,
/// already truncated to the reported count. Unused sink capacity is never
/// exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The optimal transport cost alone.
    Distance(Distance),
    /// The cost and the optimal mass-transport flows.
    Transport(Distance, Vec<Flow>),
}

impl Outcome {
    /// The scalar distance, whichever arity was requested.
    pub fn distance(&self) -> Distance {
        match self {
            Self::Distance(d) => *d,
            Self::Transport(d, _) => *d,
        }
    }
    /// The emitted flows, when the richer arity was requested.
    pub fn flows(&self) -> Option<&[Flow]> {
        match self {
            Self::Distance(_) => None,
            Self::Transport(_, flows) => Some(flows),
        }
    }
}

/// Host-value rendering: a bare number for the scalar arity, or a 2-tuple
/// of the number and a list of (from, to, amount) 3-tuples.
impl From<Outcome> for serde_json::Value {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Distance(d) => serde_json::json!(d),
            Outcome::Transport(d, flows) => serde_json::json!([
                d,
                flows
                    .iter()
                    .map(|f| serde_json::json!([f.from, f.to, f.amount]))
                    .collect::<Vec<_>>(),
            ]),
        }
    }
}
