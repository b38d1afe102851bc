//! Structural interpretation: turn a reflected value into plain JSON shape.
//!
//! Objects become maps keyed by their declared field names, sequences and
//! maps are interpreted element-wise, tuples become two-element sequences
//! (the shape the JSON coder writes them in), and a present optional is unwrapped
//! one layer before being interpreted itself. An absent optional stays an
//! explicit `Optional(None)` so that later stages can still tell "nil" from
//! "missing".
//!
//! [`canonical_serialize`] produces the other side of the comparison: the
//! keyed structure the standard coder actually emits, with every declared
//! rename and omission applied.

use crate::error::KernelError;
use crate::value::{DynamicMap, DynamicValue, ShapeKind};
use serde::Serialize;

/// Interpret any value, dispatching on its shape. Scalars are returned
/// unchanged.
pub fn interpret(value: &DynamicValue) -> Result<DynamicValue, KernelError> {
    match value {
        DynamicValue::Object(_) => interpret_object(value).map(DynamicValue::Map),
        DynamicValue::Seq(_) => interpret_array(value),
        DynamicValue::Tuple(first, second) => {
            Ok(DynamicValue::Seq(vec![interpret(first)?, interpret(second)?]))
        }
        DynamicValue::Optional(_) => interpret_optional(value),
        DynamicValue::Map(_) => interpret_dictionary(value),
        other => Ok(other.clone()),
    }
}

/// Interpret an object into a map from field name to interpreted value.
pub fn interpret_object(value: &DynamicValue) -> Result<DynamicMap, KernelError> {
    let DynamicValue::Object(fields) = value else {
        return Err(KernelError::wrong_shape(ShapeKind::Object, value));
    };
    fields
        .iter()
        .map(|(name, field)| Ok::<_, KernelError>((name.clone(), interpret(field)?)))
        .collect()
}

/// Interpret every element of a sequence.
pub fn interpret_array(value: &DynamicValue) -> Result<DynamicValue, KernelError> {
    let DynamicValue::Seq(items) = value else {
        return Err(KernelError::wrong_shape(ShapeKind::Sequence, value));
    };
    items
        .iter()
        .map(interpret)
        .collect::<Result<Vec<_>, _>>()
        .map(DynamicValue::Seq)
}

/// Interpret an optional: nil stays nil, a present value loses one layer
/// of optionality and is interpreted.
pub fn interpret_optional(value: &DynamicValue) -> Result<DynamicValue, KernelError> {
    match value {
        DynamicValue::Optional(None) => Ok(DynamicValue::none()),
        DynamicValue::Optional(Some(inner)) => interpret(inner),
        other => Err(KernelError::wrong_shape(ShapeKind::Optional, other)),
    }
}

/// Interpret every value of a map, keeping its keys.
pub fn interpret_dictionary(value: &DynamicValue) -> Result<DynamicValue, KernelError> {
    let DynamicValue::Map(entries) = value else {
        return Err(KernelError::wrong_shape(ShapeKind::Map, value));
    };
    entries
        .iter()
        .map(|(key, entry)| Ok::<_, KernelError>((key.clone(), interpret(entry)?)))
        .collect::<Result<DynamicMap, KernelError>>()
        .map(DynamicValue::Map)
}

/// Encode `value` with the standard JSON coder and read it back as a keyed
/// structure.
///
/// The top level must encode to a JSON object.
pub fn canonical_serialize<T: Serialize + ?Sized>(value: &T) -> Result<DynamicMap, KernelError> {
    let encoded = serde_json::to_vec(value)?;
    let decoded: serde_json::Value = serde_json::from_slice(&encoded)?;
    match DynamicValue::from(decoded) {
        DynamicValue::Map(map) => Ok(map),
        other => Err(KernelError::wrong_shape(ShapeKind::Map, &other)),
    }
}
