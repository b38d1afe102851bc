//! Explicit field enumeration.
//!
//! Instead of runtime introspection, every participating type describes
//! itself as a [`DynamicValue`]. Structs return
//! [`DynamicValue::Object`] with their declared fields in order; the
//! [`reflect_fields!`](crate::reflect_fields) macro writes that impl.
//!
//! Optionality is kept: `None` reflects to `Optional(None)` and `Some(x)`
//! to `Optional(Some(x))`, so the interpreter can tell an absent optional
//! from a missing field.

use crate::value::DynamicValue;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A value that can describe its own structure.
pub trait Reflect {
    fn reflect(&self) -> DynamicValue;
}

/// Implement [`Reflect`] for a struct by listing its fields.
///
/// ```
/// use keyfit_kernel::{DynamicValue, Reflect, reflect_fields};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// reflect_fields!(Point { x, y });
///
/// let reflected = Point { x: 1, y: 2 }.reflect();
/// assert_eq!(
///     reflected,
///     DynamicValue::object([("x", DynamicValue::Int(1)), ("y", DynamicValue::Int(2))])
/// );
/// ```
#[macro_export]
macro_rules! reflect_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn reflect(&self) -> $crate::DynamicValue {
                $crate::DynamicValue::Object(vec![
                    $((
                        stringify!($field).to_string(),
                        $crate::Reflect::reflect(&self.$field),
                    ),)*
                ])
            }
        }
    };
}

macro_rules! reflect_int {
    ($($ty:ty),*) => {
        $(impl Reflect for $ty {
            fn reflect(&self) -> DynamicValue {
                DynamicValue::Int(i64::from(*self))
            }
        })*
    };
}

reflect_int!(i8, i16, i32, i64, u8, u16, u32);

impl Reflect for u64 {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::from_u64(*self)
    }
}

impl Reflect for usize {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::from_u64(*self as u64)
    }
}

impl Reflect for isize {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Int(*self as i64)
    }
}

impl Reflect for f64 {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Float(*self)
    }
}

impl Reflect for bool {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Bool(*self)
    }
}

impl Reflect for String {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::String(self.clone())
    }
}

impl Reflect for str {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::String(self.to_string())
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> DynamicValue {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> DynamicValue {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Optional(self.as_ref().map(|v| Box::new(v.reflect())))
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> DynamicValue {
        self.as_slice().reflect()
    }
}

impl<A: Reflect, B: Reflect> Reflect for (A, B) {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::tuple(self.0.reflect(), self.1.reflect())
    }
}

impl<T: Reflect> Reflect for BTreeMap<String, T> {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.reflect()))
                .collect(),
        )
    }
}

impl<T: Reflect, S> Reflect for HashMap<String, T, S> {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.reflect()))
                .collect(),
        )
    }
}

impl Reflect for Value {
    fn reflect(&self) -> DynamicValue {
        DynamicValue::from(self)
    }
}

impl Reflect for DynamicValue {
    fn reflect(&self) -> DynamicValue {
        self.clone()
    }
}
