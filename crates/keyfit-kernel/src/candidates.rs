//! Candidate generation: which external keys could a field have been
//! written under?
//!
//! For one naive field the search stops at the first rule that yields
//! anything:
//!
//! 1. the canonical map has a key spelled exactly like the label;
//! 2. canonical entries whose value equals the field's value;
//! 3. the field is nil, so it was most likely omitted: keep its own label;
//! 4. nothing, and the field takes no part in resolution.

use crate::equality::equals;
use crate::value::{DynamicMap, DynamicValue};
use std::collections::{BTreeMap, BTreeSet};

/// Possible external keys for one field label.
pub type CandidateSet = BTreeSet<String>;

/// Field label (receiver) → candidate external keys.
pub type CandidatesTable = BTreeMap<String, CandidateSet>;

/// Candidate external keys for a single naive field.
pub fn candidates_for(label: &str, value: &DynamicValue, canonical: &DynamicMap) -> CandidateSet {
    if canonical.contains_key(label) {
        return CandidateSet::from([label.to_string()]);
    }

    let same_value: CandidateSet = canonical
        .iter()
        .filter(|(_, external)| equals(value, external))
        .map(|(key, _)| key.clone())
        .collect();
    if !same_value.is_empty() {
        return same_value;
    }

    if value.is_nil() {
        CandidateSet::from([label.to_string()])
    } else {
        CandidateSet::new()
    }
}

/// Build the full table for a naive object map. Fields without any
/// candidate are left out.
pub fn get_candidates(naive: &DynamicMap, canonical: &DynamicMap) -> CandidatesTable {
    naive
        .iter()
        .filter_map(|(label, value)| {
            let candidates = candidates_for(label, value, canonical);
            (!candidates.is_empty()).then(|| (label.clone(), candidates))
        })
        .collect()
}
