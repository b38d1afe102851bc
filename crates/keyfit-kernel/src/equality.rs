//! Structural deep equality over dynamic values.
//!
//! The rules, in priority order:
//!
//! 1. Both sides optional: nil/nil is equal, nil/some is not, some/some
//!    peels one layer from each side and recurses.
//! 2. One side optional: nil is not equal, some peels one layer and
//!    recurses against the other side. Repeated peeling makes nested
//!    optionals transparent (`"X" == Some(Some("X"))`).
//! 3. Sequences: same length and pairwise equal, in order.
//! 4. Maps: same size and every key present on both sides with equal
//!    values. Comparison is by key, never by position.
//! 5. Tuples: both components equal.
//! 6. Scalars of the same kind: native equality, except that NaN equals
//!    NaN so the relation stays reflexive.
//! 7. Different kinds: never equal, no coercion (`1` is not `1.0`).
//! 8. Objects: interpret both into maps and compare by rule 4.
//!
//! `Null` takes part in rules 1 and 2 as a nil optional.

use crate::interpret::interpret_object;
use crate::value::{DynamicMap, DynamicValue};

/// Whether two dynamic values are structurally equal.
///
/// Total: never fails, whatever the shapes involved.
pub fn equals(a: &DynamicValue, b: &DynamicValue) -> bool {
    match (a.is_optional(), b.is_optional()) {
        (true, true) => {
            return match (a.is_nil(), b.is_nil()) {
                (true, true) => true,
                (true, false) | (false, true) => false,
                (false, false) => equals(a.peel(), b.peel()),
            };
        }
        (true, false) => return !a.is_nil() && equals(a.peel(), b),
        (false, true) => return !b.is_nil() && equals(b.peel(), a),
        (false, false) => {}
    }

    use DynamicValue as V;
    match (a, b) {
        (V::Seq(x), V::Seq(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| equals(l, r))
        }
        (V::Map(x), V::Map(y)) => maps_equal(x, y),
        (V::Tuple(x0, x1), V::Tuple(y0, y1)) => equals(x0, y0) && equals(x1, y1),
        (V::Int(x), V::Int(y)) => x == y,
        (V::Float(x), V::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (V::Bool(x), V::Bool(y)) => x == y,
        (V::String(x), V::String(y)) => x == y,
        (V::Object(_), V::Object(_)) => match (interpret_object(a), interpret_object(b)) {
            (Ok(x), Ok(y)) => maps_equal(&x, &y),
            _ => false,
        },
        _ => false,
    }
}

/// Key-aware map comparison.
pub fn maps_equal(a: &DynamicMap, b: &DynamicMap) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| equals(value, other)))
}
