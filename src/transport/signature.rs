use crate::Arbitrary;
use crate::Feature;
use crate::Mass;

/// A weighted point set being compared.
///
/// Borrows (never copies) a features column and a weights column of equal
/// length from call-local buffers; the signature lives exactly as long as
/// one distance computation and shares nothing across calls.
#[derive(Debug, Clone, Copy)]
pub struct Signature<'a> {
    features: &'a [Feature],
    weights: &'a [Mass],
}

impl Signature<'_> {
    /// Number of weighted points.
    pub fn n(&self) -> usize {
        self.features.len()
    }
    /// Coordinate of point `i`.
    pub fn feature(&self, i: usize) -> Feature {
        self.features[i]
    }
    /// Mass of point `i`.
    pub fn weight(&self, i: usize) -> Mass {
        self.weights[i]
    }
    /// Total mass carried by the signature. Zero points carry zero mass.
    pub fn total(&self) -> Mass {
        self.weights.iter().sum()
    }
}

impl<'a> From<(&'a [Feature], &'a [Mass])> for Signature<'a> {
    fn from((features, weights): (&'a [Feature], &'a [Mass])) -> Self {
        debug_assert!(features.len() == weights.len(), "mismatched columns");
        Self { features, weights }
    }
}

/// Owned feature/weight columns.
///
/// The owned counterpart of [`Signature`], used to construct arbitrary
/// transport problems for tests and benchmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub features: Vec<Feature>,
    pub weights: Vec<Mass>,
}

impl Cloud {
    /// Borrows the columns as a signature.
    pub fn signature(&self) -> Signature<'_> {
        Signature::from((self.features.as_slice(), self.weights.as_slice()))
    }
    /// Number of weighted points.
    pub fn n(&self) -> usize {
        self.features.len()
    }
}

impl Arbitrary for Cloud {
    fn random() -> Self {
        const N: usize = 12;
        let n = 1 + rand::random_range(0..N);
        let features = (0..n).map(|_| rand::random::<Feature>()).collect();
        let weights = (0..n).map(|_| rand::random::<Mass>()).collect::<Vec<_>>();
        let total = weights.iter().sum::<Mass>().max(Mass::MIN_POSITIVE);
        let weights = weights.into_iter().map(|w| w / total).collect();
        Self { features, weights }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_cloud_carries_unit_mass() {
        let cloud = Cloud::random();
        assert!(cloud.n() > 0);
        assert!((cloud.signature().total() - 1.).abs() < 1e-9);
    }

    #[test]
    fn signature_reads_back_columns() {
        let features = vec![1., 2., 3.];
        let weights = vec![0.5, 0.25, 0.25];
        let signature = Signature::from((features.as_slice(), weights.as_slice()));
        assert!(signature.n() == 3);
        assert!(signature.feature(1) == 2.);
        assert!(signature.weight(2) == 0.25);
        assert!(signature.total() == 1.);
    }
}
