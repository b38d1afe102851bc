//! Coding-key inference for whole objects.
//!
//! The naive view (declared field names) and the canonical view (what the
//! standard coder writes) of the same object are reconciled into a map
//! from each field label to the external key it is serialized under.
//!
//! When both views are already equal, no field was renamed and every label
//! maps to itself; that case skips candidate generation entirely.

use crate::candidates::get_candidates;
use crate::equality::maps_equal;
use crate::error::KernelError;
use crate::interpret::{canonical_serialize, interpret_object};
use crate::reflect::Reflect;
use crate::resolve::{Bindings, resolve};
use crate::value::{DynamicMap, DynamicValue, ShapeKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field label of a nested object → that object's own bindings.
pub type NestedKeys = BTreeMap<String, Bindings>;

/// An object whose coding keys can be inferred.
///
/// Types holding sub-objects with their own renames override
/// [`nested_coding_keys`](CodingKeyed::nested_coding_keys), usually by
/// calling [`coding_keys_labels`] on each sub-object.
pub trait CodingKeyed: Serialize + Reflect {
    /// Bindings for directly nested objects, keyed by the field holding them.
    fn nested_coding_keys(&self) -> Result<NestedKeys, KernelError> {
        Ok(NestedKeys::new())
    }
}

/// Reconcile an interpreted naive map with its canonical counterpart.
pub fn infer_bindings(naive: &DynamicMap, canonical: &DynamicMap) -> Bindings {
    if maps_equal(canonical, naive) {
        tracing::debug!(fields = naive.len(), "canonical form matches field names");
        return naive
            .keys()
            .map(|label| (label.clone(), label.clone()))
            .collect();
    }

    let table = get_candidates(naive, canonical);
    let bindings = resolve(&table);
    tracing::debug!(
        fields = naive.len(),
        with_candidates = table.len(),
        bound = bindings.len(),
        "inferred coding keys"
    );
    bindings
}

/// Infer the external key of every field of `object`.
///
/// Fields that cannot be matched against the canonical form are absent
/// from the result.
pub fn coding_keys_labels<T: Serialize + Reflect + ?Sized>(
    object: &T,
) -> Result<Bindings, KernelError> {
    let naive = interpret_object(&object.reflect())?;
    let canonical = canonical_serialize(object)?;
    Ok(infer_bindings(&naive, &canonical))
}

/// The naive map of `object` with every key replaced by its inferred
/// external key, and every declared nested object re-keyed with its own
/// bindings.
///
/// Only one level of nesting is re-keyed. Objects below a nested object
/// keep their field names. Fields without a binding are dropped.
pub fn apply_multi_level_coding_keys<T: CodingKeyed + ?Sized>(
    object: &T,
) -> Result<DynamicMap, KernelError> {
    let naive = interpret_object(&object.reflect())?;
    let canonical = canonical_serialize(object)?;
    let bindings = infer_bindings(&naive, &canonical);

    let nested = object.nested_coding_keys()?;
    if let Some(field) = nested.keys().find(|field| !naive.contains_key(*field)) {
        return Err(KernelError::UnknownNestedField {
            field: field.clone(),
        });
    }

    let mut keyed = DynamicMap::new();
    for (label, value) in naive {
        let Some(key) = bindings.get(&label) else {
            tracing::trace!(label = %label, "no coding key, field dropped");
            continue;
        };
        let value = match nested.get(&label) {
            Some(sub_bindings) => rekey_nested(value, sub_bindings)?,
            None => value,
        };
        keyed.insert(key.clone(), value);
    }
    Ok(keyed)
}

/// Interpret an object, applying inferred coding keys on its first two
/// levels. Fails with `WrongShape` when `object` is not struct-like.
pub fn interpret_object_with_nested_types<T: CodingKeyed + ?Sized>(
    object: &T,
) -> Result<DynamicMap, KernelError> {
    apply_multi_level_coding_keys(object)
}

fn rekey_nested(value: DynamicValue, sub_bindings: &Bindings) -> Result<DynamicValue, KernelError> {
    match value {
        DynamicValue::Map(entries) => Ok(DynamicValue::Map(
            entries
                .into_iter()
                .map(|(label, v)| (sub_bindings.get(&label).cloned().unwrap_or(label), v))
                .collect(),
        )),
        nil if nil.is_nil() => Ok(nil),
        other => Err(KernelError::wrong_shape(ShapeKind::Map, &other)),
    }
}
