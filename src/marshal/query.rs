use super::error::Field;
use super::error::MarshalError;
use super::outcome::Outcome;
use super::sequence::extract;
use super::sequence::Sequence;
use crate::transport::Absolute;
use crate::transport::Coupling;
use crate::transport::Signature;
use crate::transport::Simplex;
use crate::Distance;

/// Maximum number of edges in an optimal transport plan between signatures
/// of `n1` and `n2` points. The flow sink is reserved at exactly this
/// capacity before the solver runs and is never grown mid-call.
pub const fn capacity(n1: usize, n2: usize) -> usize {
    (n1 + n2).saturating_sub(1)
}

/// One distance query over host values, keyword-addressable.
///
/// The four sequences may be of any host type satisfying [`Sequence`];
/// `feature1`/`weight1` must agree in length, as must `feature2`/`weight2`,
/// while the two signatures may differ in size. `return_flows` selects the
/// arity of the [`Outcome`]: the scalar distance alone, or the distance
/// plus the optimal flows.
pub struct Query<'a, F1, F2, W1, W2>
where
    F1: Sequence + ?Sized,
    F2: Sequence + ?Sized,
    W1: Sequence + ?Sized,
    W2: Sequence + ?Sized,
{
    pub feature1: &'a F1,
    pub feature2: &'a F2,
    pub weight1: &'a W1,
    pub weight2: &'a W2,
    pub return_flows: bool,
}

impl<F1, F2, W1, W2> Query<'_, F1, F2, W1, W2>
where
    F1: Sequence + ?Sized,
    F2: Sequence + ?Sized,
    W1: Sequence + ?Sized,
    W2: Sequence + ?Sized,
{
    /// Runs the full pipeline: shape checks, element extraction, signature
    /// assembly, solver invocation, and result marshalling.
    ///
    /// Checks run in argument order (feature1, feature2, weight1, weight2),
    /// then pairwise lengths, then extraction; the first failure wins and no
    /// partial result ever escapes. Buffers are call-local and released on
    /// every exit path.
    pub fn resolve(&self) -> Result<Outcome, MarshalError> {
        let n1 = self
            .feature1
            .count()
            .ok_or(MarshalError::NotSequence(Field::Feature1))?;
        let n2 = self
            .feature2
            .count()
            .ok_or(MarshalError::NotSequence(Field::Feature2))?;
        let m1 = self
            .weight1
            .count()
            .ok_or(MarshalError::NotSequence(Field::Weight1))?;
        let m2 = self
            .weight2
            .count()
            .ok_or(MarshalError::NotSequence(Field::Weight2))?;
        if m1 != n1 {
            return Err(MarshalError::Mismatched(Field::Feature1, Field::Weight1));
        }
        if m2 != n2 {
            return Err(MarshalError::Mismatched(Field::Feature2, Field::Weight2));
        }
        let f1 = extract(self.feature1, n1, Field::Feature1)?;
        let w1 = extract(self.weight1, n1, Field::Weight1)?;
        let f2 = extract(self.feature2, n2, Field::Feature2)?;
        let w2 = extract(self.weight2, n2, Field::Weight2)?;
        let sig1 = Signature::from((f1.as_slice(), w1.as_slice()));
        let sig2 = Signature::from((f2.as_slice(), w2.as_slice()));
        let ref ground = Absolute;
        match self.return_flows {
            false => {
                let plan = Simplex::from((sig1, sig2, ground)).minimize();
                Ok(Outcome::Distance(plan.cost()))
            }
            true => {
                let mut sink = Vec::with_capacity(capacity(n1, n2));
                let plan = Simplex::from((sig1, sig2, ground)).minimize();
                plan.spill(&mut sink);
                Ok(Outcome::Transport(plan.cost(), sink))
            }
        }
    }
}

/// Computes the Earth Mover's Distance between two weighted signatures.
///
/// The scalar arity: validates and widens the four host sequences, solves,
/// and returns the distance alone. Build a [`Query`] with `return_flows`
/// set to also receive the optimal flows.
pub fn emd<F1, F2, W1, W2>(
    feature1: &F1,
    feature2: &F2,
    weight1: &W1,
    weight2: &W2,
) -> Result<Distance, MarshalError>
where
    F1: Sequence + ?Sized,
    F2: Sequence + ?Sized,
    W1: Sequence + ?Sized,
    W2: Sequence + ?Sized,
{
    Query {
        feature1,
        feature2,
        weight1,
        weight2,
        return_flows: false,
    }
    .resolve()
    .map(|outcome| outcome.distance())
}
