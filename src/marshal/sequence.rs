use super::error::Field;
use super::error::MarshalError;

/// Widening conversion into the double-precision representation the solver
/// consumes. Every standard numeric type qualifies; nothing else does.
pub trait Numeric: Copy {
    fn widen(self) -> f64;
}

impl Numeric for f64 {
    fn widen(self) -> f64 {
        self
    }
}
impl Numeric for f32 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for i8 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for i16 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for i32 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for i64 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for isize {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for u8 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for u16 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for u32 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for u64 {
    fn widen(self) -> f64 {
        self as f64
    }
}
impl Numeric for usize {
    fn widen(self) -> f64 {
        self as f64
    }
}

/// Read-only, duck-typed view of a host sequence.
///
/// Anything with sized, indexed access qualifies; elements are admitted one
/// at a time, so validation can abort at the first offender without touching
/// the rest of the value. Reads never mutate the host value.
pub trait Sequence {
    /// Element count, or None when the value is not sequence-like.
    fn count(&self) -> Option<usize>;
    /// Element at `index` widened to a double, or None when it is not a
    /// number (or out of range).
    fn number(&self, index: usize) -> Option<f64>;
}

/// Dynamically-typed host values: only arrays are sequences, and only JSON
/// numbers (integral or floating) are admitted as elements. Strings,
/// booleans, null, and nested containers are rejected.
impl Sequence for serde_json::Value {
    fn count(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }
    fn number(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(serde_json::Value::as_f64)
    }
}

impl<T> Sequence for [T]
where
    T: Numeric,
{
    fn count(&self) -> Option<usize> {
        Some(self.len())
    }
    fn number(&self, index: usize) -> Option<f64> {
        self.get(index).copied().map(Numeric::widen)
    }
}

impl<T, const N: usize> Sequence for [T; N]
where
    T: Numeric,
{
    fn count(&self) -> Option<usize> {
        Some(N)
    }
    fn number(&self, index: usize) -> Option<f64> {
        self.as_slice().number(index)
    }
}

impl<T> Sequence for Vec<T>
where
    T: Numeric,
{
    fn count(&self) -> Option<usize> {
        Some(self.len())
    }
    fn number(&self, index: usize) -> Option<f64> {
        self.as_slice().number(index)
    }
}

/// Copies `count` numeric elements out of a host sequence into an owned
/// double-precision buffer. Aborts on the first non-numeric element, naming
/// the field; the partial buffer is dropped on the unwind path.
pub fn extract<S>(host: &S, count: usize, field: Field) -> Result<Vec<f64>, MarshalError>
where
    S: Sequence + ?Sized,
{
    let mut buffer = Vec::with_capacity(count);
    for index in 0..count {
        match host.number(index) {
            Some(x) => buffer.push(x),
            None => return Err(MarshalError::NotNumeric(field)),
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_widen_to_doubles() {
        let value = serde_json::json!([1, 2.5, -3]);
        assert!(value.count() == Some(3));
        let buffer = extract(&value, 3, Field::Feature1).unwrap();
        assert!(buffer == vec![1., 2.5, -3.]);
    }

    #[test]
    fn json_rejects_non_numeric_elements() {
        let value = serde_json::json!([1, "x", 3]);
        assert!(value.number(0) == Some(1.));
        assert!(value.number(1).is_none());
        let error = extract(&value, 3, Field::Weight1);
        assert!(error == Err(MarshalError::NotNumeric(Field::Weight1)));
    }

    #[test]
    fn json_rejects_booleans_null_and_nesting() {
        let value = serde_json::json!([true, null, [1], {"a": 1}]);
        assert!((0..4).all(|i| value.number(i).is_none()));
    }

    #[test]
    fn json_non_arrays_are_not_sequences() {
        assert!(serde_json::json!(42).count().is_none());
        assert!(serde_json::json!("[1, 2]").count().is_none());
        assert!(serde_json::json!({"len": 2}).count().is_none());
    }

    #[test]
    fn native_collections_are_sequences() {
        let ints = vec![1i32, 2, 3];
        let floats = [0.5f64, 1.5];
        assert!(ints.count() == Some(3));
        assert!(ints.number(2) == Some(3.));
        assert!(floats.count() == Some(2));
        assert!(floats.number(1) == Some(1.5));
        assert!(floats.number(2).is_none());
    }

    #[test]
    fn empty_extraction_is_legal() {
        let value = serde_json::json!([]);
        let buffer = extract(&value, 0, Field::Feature2).unwrap();
        assert!(buffer.is_empty());
    }
}
