/// The four host-facing arguments, named for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Feature1,
    Feature2,
    Weight1,
    Weight2,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feature1 => write!(f, "feature1"),
            Self::Feature2 => write!(f, "feature2"),
            Self::Weight1 => write!(f, "weight1"),
            Self::Weight2 => write!(f, "weight2"),
        }
    }
}

/// Errors raised while marshalling host arguments.
///
/// Shape errors (not a sequence, mismatched pair lengths) are detected
/// before any numeric work; type errors abort extraction at the first
/// offending element. The first failure wins and nothing partial escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// The named argument does not support sized, indexed access.
    NotSequence(Field),
    /// The named feature/weight pair have different lengths.
    Mismatched(Field, Field),
    /// An element of the named argument is not a number.
    NotNumeric(Field),
}

impl std::fmt::Display for MarshalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSequence(x) => write!(f, "{} must be a sequence", x),
            Self::Mismatched(x, y) => write!(f, "{} and {} must be the same length", x, y),
            Self::NotNumeric(x) => write!(f, "{} should be a sequence of numbers", x),
        }
    }
}

impl std::error::Error for MarshalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        assert!(MarshalError::NotSequence(Field::Weight2)
            .to_string()
            .contains("weight2"));
        assert!(MarshalError::NotNumeric(Field::Feature2)
            .to_string()
            .contains("feature2"));
        let mismatched = MarshalError::Mismatched(Field::Feature1, Field::Weight1);
        assert!(mismatched.to_string().contains("feature1"));
        assert!(mismatched.to_string().contains("weight1"));
    }
}
