//! Coding-key inference on real `serde` types.
//!
//! Each type derives `Serialize` with its own `rename`/`skip` attributes
//! and lists its fields through `reflect_fields!`; the tests check that
//! inference recovers the renames.

use keyfit_kernel::{
    Bindings, CodingKeyed, KernelError, NestedKeys, Reflect, apply_multi_level_coding_keys,
    canonical_serialize, coding_keys_labels, interpret_object, interpret_object_with_nested_types,
    maps_equal, reflect_fields,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize)]
struct Named {
    name: String,
}
reflect_fields!(Named { name });

fn named(name: &str) -> Named {
    Named {
        name: name.to_string(),
    }
}

fn dict(key: &str, value: i64) -> BTreeMap<String, i64> {
    BTreeMap::from([(key.to_string(), value)])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_injective(bindings: &Bindings) {
    let keys: BTreeSet<&String> = bindings.values().collect();
    assert_eq!(keys.len(), bindings.len(), "not injective: {bindings:?}");
}

// ─── No coding keys ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Plain {
    string: String,
    empty_string: String,
    int: i64,
    double: f64,
    boolean: bool,
    optional: Option<String>,
    nil_optional: Option<String>,
    array: Vec<String>,
    object: Option<Named>,
    dict: BTreeMap<String, i64>,
}
reflect_fields!(Plain {
    string,
    empty_string,
    int,
    double,
    boolean,
    optional,
    nil_optional,
    array,
    object,
    dict,
});

fn plain() -> Plain {
    Plain {
        string: "aaa".into(),
        empty_string: String::new(),
        int: 10,
        double: 10.2,
        boolean: true,
        optional: Some("bbb".into()),
        nil_optional: None,
        array: strings(&["aaa", "bbb"]),
        object: Some(named("ccc")),
        dict: dict("2", 2),
    }
}

#[test]
fn object_without_keys_maps_every_field_to_itself() {
    let keys = coding_keys_labels(&plain()).unwrap();
    assert_eq!(keys.len(), 10);
    assert!(keys.iter().all(|(label, key)| label == key));
}

// ─── Simple coding keys ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct WithCodingKeys {
    string: String,
    empty_string: String,
    #[serde(rename = "int3")]
    int: i64,
    #[serde(rename = "int4")]
    int2: i64,
    #[serde(rename = "changedDouble")]
    double: f64,
    #[serde(rename = "boolean3")]
    boolean: bool,
    boolean2: bool,
    optional: Option<String>,
    nil_optional: Option<String>,
    array: Vec<String>,
    object: Option<Named>,
    dict: BTreeMap<String, i64>,
}
reflect_fields!(WithCodingKeys {
    string,
    empty_string,
    int,
    int2,
    double,
    boolean,
    boolean2,
    optional,
    nil_optional,
    array,
    object,
    dict,
});

fn with_coding_keys() -> WithCodingKeys {
    WithCodingKeys {
        string: "aaa".into(),
        empty_string: String::new(),
        int: 10,
        int2: 11,
        double: 10.2,
        boolean: true,
        boolean2: false,
        optional: Some("bbb".into()),
        nil_optional: None,
        array: strings(&["aaa", "bbb"]),
        object: Some(named("ccc")),
        dict: dict("2", 2),
    }
}

#[test]
fn simple_object_recovers_every_rename() {
    let obj = with_coding_keys();
    let keys = coding_keys_labels(&obj).unwrap();

    assert_eq!(keys.len(), 12);
    assert_eq!(keys["int"], "int3");
    assert_eq!(keys["int2"], "int4");
    assert_eq!(keys["double"], "changedDouble");
    assert_eq!(keys["boolean"], "boolean3");
    assert_eq!(keys["boolean2"], "boolean2");

    let canonical = canonical_serialize(&obj).unwrap();
    let bound: BTreeSet<&str> = keys.values().map(String::as_str).collect();
    let written: BTreeSet<&str> = canonical.keys().map(String::as_str).collect();
    assert_eq!(bound, written);
    assert_injective(&keys);
}

// ─── Extreme coding keys ────────────────────────────────────────────────────

#[derive(Serialize)]
struct Extreme {
    #[serde(rename = "correct_string")]
    string: String,
    #[serde(rename = "correct_string2")]
    string2: String,

    #[serde(rename = "correct_int")]
    int: i64,
    #[serde(rename = "correct_int2")]
    int2: i64,
    #[serde(rename = "correct_int3")]
    int3: i64,

    #[serde(rename = "correct_double")]
    double: f64,
    #[serde(rename = "correct_double2")]
    double2: f64,
    #[serde(rename = "correct_double3")]
    double3: f64,

    #[serde(rename = "correct_boolean")]
    boolean: bool,
    #[serde(rename = "correct_boolean2")]
    boolean2: bool,
    #[serde(rename = "correct_boolean3")]
    boolean3: bool,

    #[serde(rename = "correct_optional")]
    optional: Option<String>,
    #[serde(rename = "correct_optional2")]
    optional2: Option<String>,
    #[serde(rename = "correct_optional3")]
    optional3: Option<String>,

    same: String,
    same2: String,
    same3: String,

    #[serde(rename = "correct_nilOptional")]
    nil_optional: Option<String>,
    #[serde(rename = "correct_nilOptional2")]
    nil_optional2: Option<String>,
    #[serde(rename = "correct_nilOptional3")]
    nil_optional3: Option<String>,

    #[serde(rename = "correct_array")]
    array: Vec<String>,
    #[serde(rename = "correct_array2")]
    array2: Vec<String>,
    #[serde(rename = "correct_array3")]
    array3: Vec<String>,

    #[serde(rename = "correct_object")]
    object: Option<Named>,
    #[serde(rename = "correct_object2")]
    object2: Option<Named>,
    #[serde(rename = "correct_object3")]
    object3: Named,

    #[serde(rename = "correct_dict")]
    dict: BTreeMap<String, i64>,
    #[serde(rename = "correct_dict2")]
    dict2: BTreeMap<String, i64>,
    #[serde(rename = "correct_dict3")]
    dict3: BTreeMap<String, i64>,
    #[serde(rename = "correct_dict4")]
    dict4: BTreeMap<String, i64>,
    #[serde(rename = "correct_dict5")]
    dict5: BTreeMap<String, i64>,

    #[serde(skip)]
    disappear1: i64,
    #[serde(skip)]
    disappear2: i64,
    #[serde(skip)]
    disappear3: i64,
}
reflect_fields!(Extreme {
    string,
    string2,
    int,
    int2,
    int3,
    double,
    double2,
    double3,
    boolean,
    boolean2,
    boolean3,
    optional,
    optional2,
    optional3,
    same,
    same2,
    same3,
    nil_optional,
    nil_optional2,
    nil_optional3,
    array,
    array2,
    array3,
    object,
    object2,
    object3,
    dict,
    dict2,
    dict3,
    dict4,
    dict5,
    disappear1,
    disappear2,
    disappear3,
});

fn extreme() -> Extreme {
    Extreme {
        string: "aaa".into(),
        string2: "bbb".into(),
        int: 11,
        int2: 11,
        int3: 10,
        double: 10.2,
        double2: 10.2,
        double3: 11.2,
        boolean: true,
        boolean2: true,
        boolean3: false,
        optional: Some("bbb".into()),
        optional2: Some("bbb".into()),
        optional3: Some("aaa".into()),
        same: "a".into(),
        same2: "a".into(),
        same3: "b".into(),
        nil_optional: None,
        nil_optional2: None,
        nil_optional3: Some("aaab".into()),
        array: strings(&["aaa", "bbb"]),
        array2: strings(&["aaa", "bbb"]),
        array3: strings(&["aaa"]),
        object: Some(named("ccc")),
        object2: Some(named("ccc")),
        object3: named("ddd"),
        dict: dict("2", 2),
        dict2: dict("2", 2),
        dict3: dict("3", 2),
        dict4: dict("2", 4),
        dict5: dict("3", 4),
        disappear1: 0,
        disappear2: 0,
        disappear3: 1,
    }
}

#[test]
fn extreme_object_binds_uncontested_keys_and_keeps_ties_unchanged() {
    let keys = coding_keys_labels(&extreme()).unwrap();

    let expected: Bindings = [
        // Uncontested values resolve to their renamed key.
        ("int3", "correct_int3"),
        ("double3", "correct_double3"),
        ("boolean3", "correct_boolean3"),
        ("nil_optional3", "correct_nilOptional3"),
        ("array3", "correct_array3"),
        ("object3", "correct_object3"),
        ("dict3", "correct_dict3"),
        ("dict4", "correct_dict4"),
        ("dict5", "correct_dict5"),
        // Exact names.
        ("same", "same"),
        ("same2", "same2"),
        ("same3", "same3"),
        // Values shared by several fields cannot be told apart.
        ("string", "string"),
        ("string2", "string2"),
        ("int", "int"),
        ("int2", "int2"),
        ("double", "double"),
        ("double2", "double2"),
        ("boolean", "boolean"),
        ("boolean2", "boolean2"),
        ("optional", "optional"),
        ("optional2", "optional2"),
        ("optional3", "optional3"),
        ("nil_optional", "nil_optional"),
        ("nil_optional2", "nil_optional2"),
        ("array", "array"),
        ("array2", "array2"),
        ("object", "object"),
        ("object2", "object2"),
        ("dict", "dict"),
        ("dict2", "dict2"),
    ]
    .into_iter()
    .map(|(label, key)| (label.to_string(), key.to_string()))
    .collect();

    assert_eq!(keys, expected);
    assert_injective(&keys);
}

#[test]
fn skipped_fields_are_dropped() {
    let keys = coding_keys_labels(&extreme()).unwrap();
    for label in ["disappear1", "disappear2", "disappear3"] {
        assert!(!keys.contains_key(label), "{label} should have no binding");
    }
}

// ─── Tuple fields ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct WithPair {
    name: String,
    #[serde(rename = "p")]
    pair: (i64, i64),
}
reflect_fields!(WithPair { name, pair });

#[derive(Serialize)]
struct PlainPair {
    name: String,
    pair: (i64, Option<String>),
}
reflect_fields!(PlainPair { name, pair });

#[test]
fn renamed_tuple_field_binds_to_its_key() {
    let keys = coding_keys_labels(&WithPair {
        name: "a".into(),
        pair: (1, 2),
    })
    .unwrap();
    assert_eq!(keys.get("pair").map(String::as_str), Some("p"));
    assert_eq!(keys.get("name").map(String::as_str), Some("name"));
}

#[test]
fn unrenamed_tuple_field_matches_canonical_form() {
    let obj = PlainPair {
        name: "a".into(),
        pair: (3, Some("x".into())),
    };
    let naive = interpret_object(&obj.reflect()).unwrap();
    let canonical = canonical_serialize(&obj).unwrap();
    assert!(maps_equal(&naive, &canonical), "{naive:?}\n!=\n{canonical:?}");

    let keys = coding_keys_labels(&obj).unwrap();
    assert!(keys.iter().all(|(label, key)| label == key));
    assert_eq!(keys.len(), 2);
}

// ─── Nested coding keys ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct NestedObject {
    name: String,
    #[serde(rename = "int2")]
    int: i64,
}
reflect_fields!(NestedObject { name, int });

#[derive(Serialize)]
struct WithNestedCodingKeys {
    string: String,
    #[serde(rename = "int2")]
    int: i64,
    #[serde(rename = "double2")]
    double: f64,
    #[serde(rename = "boolean2")]
    boolean: bool,
    object: Option<NestedObject>,
}
reflect_fields!(WithNestedCodingKeys {
    string,
    int,
    double,
    boolean,
    object,
});

impl CodingKeyed for WithNestedCodingKeys {
    fn nested_coding_keys(&self) -> Result<NestedKeys, KernelError> {
        let mut nested = NestedKeys::new();
        if let Some(object) = &self.object {
            nested.insert("object".to_string(), coding_keys_labels(object)?);
        }
        Ok(nested)
    }
}

fn with_nested_coding_keys() -> WithNestedCodingKeys {
    WithNestedCodingKeys {
        string: "aaa".into(),
        int: 10,
        double: 10.2,
        boolean: true,
        object: Some(NestedObject {
            name: "ccc".into(),
            int: 1,
        }),
    }
}

#[test]
fn nested_object_top_level_keys() {
    let keys = coding_keys_labels(&with_nested_coding_keys()).unwrap();
    let expected: Bindings = [
        ("boolean", "boolean2"),
        ("double", "double2"),
        ("int", "int2"),
        ("object", "object"),
        ("string", "string"),
    ]
    .into_iter()
    .map(|(label, key)| (label.to_string(), key.to_string()))
    .collect();
    assert_eq!(keys, expected);
}

#[test]
fn nested_object_rekeyed_map_matches_canonical_form() {
    let obj = with_nested_coding_keys();
    let keyed = interpret_object_with_nested_types(&obj).unwrap();
    let canonical = canonical_serialize(&obj).unwrap();
    assert!(maps_equal(&keyed, &canonical), "{keyed:?}\n!=\n{canonical:?}");

    let direct = apply_multi_level_coding_keys(&obj).unwrap();
    assert_eq!(direct, keyed);
}
