//! Dynamically typed JSON-like values.
//!
//! `DynamicValue` is the common currency between the two views of an
//! object that key inference reconciles:
//!
//! - the **naive** view, produced by walking the object's declared fields
//!   (see [`crate::reflect`]), where optionality is kept explicit, and
//! - the **canonical** view, produced by the standard coder and decoded
//!   back into a keyed structure (see [`crate::interpret::canonical_serialize`]).
//!
//! Maps are `BTreeMap`s: enumeration order is lexicographic and therefore
//! deterministic across runs.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Ordered `(field name, value)` pairs of a reflected object.
pub type Fields = Vec<(String, DynamicValue)>;

/// A string-keyed map of dynamic values.
pub type DynamicMap = BTreeMap<String, DynamicValue>;

/// A closed tagged union over every shape the interpreter understands.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// JSON `null`, the canonical image of an absent optional.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Seq(Vec<DynamicValue>),
    Map(DynamicMap),
    Tuple(Box<DynamicValue>, Box<DynamicValue>),
    /// A struct-like value, not yet interpreted into a map.
    Object(Fields),
    /// An optional wrapper. Nesting is allowed (`Some(Some(None))`).
    Optional(Option<Box<DynamicValue>>),
}

/// The structural kinds the interpreter can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Object,
    Sequence,
    Optional,
    Map,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Object => "object",
            ShapeKind::Sequence => "sequence",
            ShapeKind::Optional => "optional",
            ShapeKind::Map => "map",
        };
        f.write_str(name)
    }
}

impl DynamicValue {
    /// Wrap a value in one layer of `Optional(Some(_))`.
    pub fn some(value: DynamicValue) -> Self {
        DynamicValue::Optional(Some(Box::new(value)))
    }

    /// The empty optional.
    pub fn none() -> Self {
        DynamicValue::Optional(None)
    }

    /// Build an object from `(name, value)` pairs, keeping their order.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DynamicValue)>,
    {
        DynamicValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DynamicValue)>,
    {
        DynamicValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn tuple(first: DynamicValue, second: DynamicValue) -> Self {
        DynamicValue::Tuple(Box::new(first), Box::new(second))
    }

    /// Whether this value takes part in optional semantics.
    ///
    /// `Null` counts: it is what an absent optional becomes after a trip
    /// through the canonical coder.
    pub fn is_optional(&self) -> bool {
        matches!(self, DynamicValue::Optional(_) | DynamicValue::Null)
    }

    /// Whether this value is an empty optional (or `Null`).
    ///
    /// Only the outermost layer is inspected: `Some(None)` is not nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, DynamicValue::Optional(None) | DynamicValue::Null)
    }

    /// Peel exactly one optional layer. Non-optional values are returned
    /// unchanged; nil values stay nil.
    pub fn peel(&self) -> &DynamicValue {
        match self {
            DynamicValue::Optional(Some(inner)) => inner,
            other => other,
        }
    }

    /// Peel every `Some` layer. A nil anywhere in the chain is returned
    /// as that nil.
    pub fn unwrap_optional(&self) -> &DynamicValue {
        match self {
            DynamicValue::Optional(Some(inner)) => inner.unwrap_optional(),
            other => other,
        }
    }

    /// A short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Bool(_) => "bool",
            DynamicValue::Int(_) => "int",
            DynamicValue::Float(_) => "float",
            DynamicValue::String(_) => "string",
            DynamicValue::Seq(_) => "sequence",
            DynamicValue::Map(_) => "map",
            DynamicValue::Tuple(..) => "tuple",
            DynamicValue::Object(_) => "object",
            DynamicValue::Optional(_) => "optional",
        }
    }

    /// Integers the canonical coder reads back as floats keep that kind here.
    pub fn from_u64(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => DynamicValue::Int(v),
            Err(_) => DynamicValue::Float(value as f64),
        }
    }

    /// Render as plain JSON. Optionals collapse to their payload or `null`,
    /// tuples become two-element arrays, objects become JSON objects.
    pub fn to_json(&self) -> Value {
        match self {
            DynamicValue::Null | DynamicValue::Optional(None) => Value::Null,
            DynamicValue::Optional(Some(inner)) => inner.to_json(),
            DynamicValue::Bool(b) => Value::Bool(*b),
            DynamicValue::Int(i) => Value::Number((*i).into()),
            DynamicValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            DynamicValue::String(s) => Value::String(s.clone()),
            DynamicValue::Seq(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            DynamicValue::Tuple(a, b) => Value::Array(vec![a.to_json(), b.to_json()]),
            DynamicValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            DynamicValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for DynamicValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => DynamicValue::Null,
            Value::Bool(b) => DynamicValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DynamicValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    DynamicValue::from_u64(u)
                } else {
                    n.as_f64().map_or(DynamicValue::Null, DynamicValue::Float)
                }
            }
            Value::String(s) => DynamicValue::String(s.clone()),
            Value::Array(items) => DynamicValue::Seq(items.iter().map(DynamicValue::from).collect()),
            Value::Object(map) => DynamicValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), DynamicValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for DynamicValue {
    fn from(value: Value) -> Self {
        DynamicValue::from(&value)
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DynamicValue::Null | DynamicValue::Optional(None) => serializer.serialize_none(),
            DynamicValue::Optional(Some(inner)) => serializer.serialize_some(inner.as_ref()),
            DynamicValue::Bool(b) => serializer.serialize_bool(*b),
            DynamicValue::Int(i) => serializer.serialize_i64(*i),
            DynamicValue::Float(f) => serializer.serialize_f64(*f),
            DynamicValue::String(s) => serializer.serialize_str(s),
            DynamicValue::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DynamicValue::Tuple(a, b) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(a.as_ref())?;
                seq.serialize_element(b.as_ref())?;
                seq.end()
            }
            DynamicValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            DynamicValue::Object(fields) => {
                let mut out = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
