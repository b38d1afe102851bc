//! # Keyfit Kernel
//!
//! Coding-key inference: recover, for every field of an object, the key
//! the standard JSON coder writes it under, without access to the type's
//! renaming declarations.
//!
//! Two views of one object are reconciled. The **naive** view walks the
//! declared fields; the **canonical** view is the coder's own output read
//! back as a keyed map. Fields are matched by exact name first, then by
//! value, and the ambiguous remainder is narrowed to one-to-one bindings.
//!
//! ## Architecture
//!
//! ```text
//! DynamicValue        ← Tagged JSON-like values, optionals kept explicit
//!     │
//! Reflect / interpret ← Naive view (declared fields) and canonical view
//!     │
//! equals              ← Deep equality with optional transparency
//!     │
//! get_candidates      ← Label → plausible external keys
//!     │
//! resolve             ← Greedy unique-binding narrowing
//!     │
//! coding_keys_labels  ← Facade, plus one level of nested re-keying
//! ```

pub mod candidates;
pub mod coding_keys;
pub mod equality;
pub mod error;
pub mod interpret;
pub mod reflect;
pub mod resolve;
pub mod value;

pub use candidates::{CandidateSet, CandidatesTable, candidates_for, get_candidates};
pub use coding_keys::{
    CodingKeyed, NestedKeys, apply_multi_level_coding_keys, coding_keys_labels, infer_bindings,
    interpret_object_with_nested_types,
};
pub use equality::{equals, maps_equal};
pub use error::KernelError;
pub use interpret::{
    canonical_serialize, interpret, interpret_array, interpret_dictionary, interpret_object,
    interpret_optional,
};
pub use reflect::Reflect;
pub use resolve::{Assignment, Bindings, assign_label, is_unique_binding, resolve};
pub use value::{DynamicMap, DynamicValue, Fields, ShapeKind};
