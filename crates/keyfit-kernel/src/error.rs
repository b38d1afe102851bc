//! Error types for kernel operations.

use crate::value::{DynamicValue, ShapeKind};

/// Errors raised while interpreting or serializing a value.
///
/// Key resolution itself never fails: a field that cannot be matched is
/// left out of the bindings instead.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// A value was interpreted as a kind it is not.
    #[error("wrong shape: expected {expected}, found {} `{actual}`", .actual.kind_name())]
    WrongShape {
        expected: ShapeKind,
        actual: DynamicValue,
    },

    /// A nested key declaration names a field the object does not have.
    #[error("nested coding keys declared for unknown field `{field}`")]
    UnknownNestedField { field: String },

    /// The canonical coder rejected the value.
    #[error("canonical serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KernelError {
    pub(crate) fn wrong_shape(expected: ShapeKind, actual: &DynamicValue) -> Self {
        KernelError::WrongShape {
            expected,
            actual: actual.clone(),
        }
    }
}
