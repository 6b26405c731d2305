//! Structural equality, total ordering, and truthiness (spec §4.3).

use crate::value::Value;

/// The result of `compare`: always resolves to -1/0/1 (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering3 {
    Less,
    Equal,
    Greater,
}

impl Ordering3 {
    pub fn to_int(self) -> i64 {
        match self {
            Ordering3::Less => -1,
            Ordering3::Equal => 0,
            Ordering3::Greater => 1,
        }
    }
}

/// Numeric value as f64, for cross-kind numeric comparison (INTEGER≡FLOAT).
fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// A fixed tag order used so that cross-kind comparison is total (§4.3).
fn tag_rank(v: &Value) -> u8 {
    match v {
        Value::Int(_) | Value::Float(_) => 0,
        Value::Bool(_) => 1,
        Value::Char(_) => 2,
        Value::Str(_) => 3,
        Value::Symbol(_) => 4,
        Value::List(_) => 5,
        Value::Quotation(_) => 6,
        Value::Set(_) => 7,
        Value::File(_) => 8,
    }
}

/// Permissive equality: numeric kinds compare by mathematical value,
/// LIST/QUOTATION compare element-wise regardless of which of the two
/// variants each side is, SET compares against INTEGER by bitmask,
/// heterogeneous comparisons between unrelated kinds default to false.
pub fn equal(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) {
        return x == y;
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Set(x), Value::Set(y)) => x == y,
        (Value::Set(s), Value::Int(i)) | (Value::Int(i), Value::Set(s)) => *s as i64 == *i,
        (Value::List(x), Value::List(y))
        | (Value::List(x), Value::Quotation(y))
        | (Value::Quotation(x), Value::List(y))
        | (Value::Quotation(x), Value::Quotation(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| equal(p, q))
        }
        (Value::File(x), Value::File(y)) => x == y,
        _ => false,
    }
}

/// Total ordering over values (§4.3 `compare`).
pub fn compare(a: &Value, b: &Value) -> Ordering3 {
    if let (Some(x), Some(y)) = (as_f64(a), as_f64(b)) {
        return from_std(x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal));
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => from_std(x.cmp(y)),
        (Value::Char(x), Value::Char(y)) => from_std(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => from_std(x.as_ref().cmp(y.as_ref())),
        (Value::Symbol(x), Value::Symbol(y)) => from_std(x.as_ref().cmp(y.as_ref())),
        (Value::Set(x), Value::Set(y)) => from_std(x.cmp(y)),
        (Value::List(x), Value::List(y))
        | (Value::List(x), Value::Quotation(y))
        | (Value::Quotation(x), Value::List(y))
        | (Value::Quotation(x), Value::Quotation(y)) => compare_seq(x, y),
        _ => {
            let (ra, rb) = (tag_rank(a), tag_rank(b));
            from_std(ra.cmp(&rb))
        }
    }
}

fn compare_seq(x: &[Value], y: &[Value]) -> Ordering3 {
    for (p, q) in x.iter().zip(y.iter()) {
        match compare(p, q) {
            Ordering3::Equal => continue,
            other => return other,
        }
    }
    from_std(x.len().cmp(&y.len()))
}

fn from_std(o: std::cmp::Ordering) -> Ordering3 {
    match o {
        std::cmp::Ordering::Less => Ordering3::Less,
        std::cmp::Ordering::Equal => Ordering3::Equal,
        std::cmp::Ordering::Greater => Ordering3::Greater,
    }
}

/// Truthiness (§4.3): booleans by value, numerics by nonzero, aggregates by
/// non-empty, sets by nonzero bitmask, symbols/files always true.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Char(c) => *c != 0,
        Value::Str(s) => !s.is_empty(),
        Value::List(v) | Value::Quotation(v) => !v.is_empty(),
        Value::Set(s) => *s != 0,
        Value::Symbol(_) | Value::File(_) => true,
    }
}

/// Convenience re-export point used by `joy_core::kind_name`.
pub fn kind_name(v: &Value) -> &'static str {
    v.kind_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_equality_crosses_kinds() {
        assert!(equal(&Value::Int(3), &Value::Float(3.0)));
        assert!(!equal(&Value::Int(3), &Value::Float(3.5)));
    }

    #[test]
    fn list_and_quotation_compare_equal_when_elements_match() {
        let l = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let q = Value::quotation(vec![Value::Int(1), Value::Int(2)]);
        assert!(equal(&l, &q));
        assert_eq!(compare(&l, &q), Ordering3::Equal);
    }

    #[test]
    fn set_equals_integer_by_bitmask() {
        assert!(equal(&Value::Set(0b110), &Value::Int(0b110)));
    }

    #[test]
    fn truthy_empty_aggregate_is_false() {
        assert!(!truthy(&Value::list(vec![])));
        assert!(!truthy(&Value::Set(0)));
        assert!(truthy(&Value::symbol("x")));
    }
}
