//! Binding resolution: narrow a candidates table to one-to-one bindings.
//!
//! Two dual tests drive the narrowing:
//!
//! - a receiver has a unique candidate when its set has exactly one key;
//! - a candidate has a unique receiver when exactly one label lists it.
//!
//! Each step first prunes every candidate set down to the candidates that
//! currently have a unique receiver, then decides the label in hand. The
//! pruned table, minus the labels just bound, is what the next step sees,
//! so the pool only ever shrinks and one pass over the labels terminates.
//!
//! This is a greedy, single-pass heuristic rather than a maximum matching.
//! Labels whose candidates are all contested end up bound to themselves.

use crate::candidates::{CandidateSet, CandidatesTable};
use std::collections::{BTreeMap, BTreeSet};

/// Field label → resolved external key.
pub type Bindings = BTreeMap<String, String>;

/// Result of deciding one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Bindings produced by this step (usually zero or one).
    pub assigned: Bindings,
    /// The pruned table left for the following steps.
    pub remaining: CandidatesTable,
}

/// Labels that list `candidate` among their candidates.
pub fn receivers_for<'a>(candidate: &str, table: &'a CandidatesTable) -> Vec<&'a str> {
    table
        .iter()
        .filter(|(_, candidates)| candidates.contains(candidate))
        .map(|(label, _)| label.as_str())
        .collect()
}

/// Whether `label` has exactly one candidate left.
pub fn receiver_has_unique_candidate(label: &str, table: &CandidatesTable) -> bool {
    table.get(label).is_some_and(|candidates| candidates.len() == 1)
}

/// Whether exactly one label claims `candidate`.
pub fn candidate_has_unique_receiver(candidate: &str, table: &CandidatesTable) -> bool {
    receivers_for(candidate, table).len() == 1
}

/// Drop every candidate that more than one label claims.
pub fn prune_to_unique_receivers(table: &CandidatesTable) -> CandidatesTable {
    table
        .iter()
        .map(|(label, candidates)| {
            let kept: CandidateSet = candidates
                .iter()
                .filter(|candidate| candidate_has_unique_receiver(candidate, table))
                .cloned()
                .collect();
            (label.clone(), kept)
        })
        .collect()
}

/// Whether `label` would be bound to a single uncontested key.
pub fn is_unique_binding(label: &str, table: &CandidatesTable) -> bool {
    receiver_has_unique_candidate(label, &prune_to_unique_receivers(table))
}

/// Decide one label against the current table.
///
/// - label no longer in the table: nothing is bound;
/// - no uncontested candidate left: the label binds to itself;
/// - one left: the label binds to it;
/// - several left: every label sharing exactly that set is paired with
///   the candidates positionally, in table order.
pub fn assign_label(table: &CandidatesTable, receiver: &str) -> Assignment {
    let pruned = prune_to_unique_receivers(table);

    let Some(candidates) = pruned.get(receiver) else {
        let mut remaining = pruned;
        remaining.remove(receiver);
        return Assignment {
            assigned: Bindings::new(),
            remaining,
        };
    };

    let assigned: Bindings = match candidates.len() {
        0 => Bindings::from([(receiver.to_string(), receiver.to_string())]),
        1 => candidates
            .iter()
            .map(|candidate| (receiver.to_string(), candidate.clone()))
            .collect(),
        _ => pruned
            .iter()
            .filter(|(_, other)| *other == candidates)
            .map(|(label, _)| label.clone())
            .zip(candidates.iter().cloned())
            .collect(),
    };

    let remaining = pruned
        .into_iter()
        .filter(|(label, _)| !assigned.contains_key(label))
        .collect();

    Assignment {
        assigned,
        remaining,
    }
}

/// Resolve a whole table: visit every label once, in table order, each
/// time against what the previous step left.
pub fn resolve(table: &CandidatesTable) -> Bindings {
    let mut bindings = Bindings::new();
    let mut remaining = table.clone();

    for receiver in table.keys() {
        let step = assign_label(&remaining, receiver);
        for (label, key) in &step.assigned {
            tracing::trace!(label = %label, key = %key, "bound coding key");
        }
        bindings.extend(step.assigned);
        remaining = step.remaining;
    }

    enforce_injective(bindings)
}

/// Keep the first binding for every external key, in label order.
///
/// Guards the injectivity post-condition only; no input to `resolve` is
/// known to reach the drop branch. A label's own name is a candidate of no
/// other label unless it is contested, and a contested key is pruned for
/// good before any later step sees it.
fn enforce_injective(bindings: Bindings) -> Bindings {
    let mut seen = BTreeSet::new();
    bindings
        .into_iter()
        .filter(|(label, key)| {
            let fresh = seen.insert(key.clone());
            if !fresh {
                tracing::warn!(label = %label, key = %key, "dropping duplicate coding key binding");
            }
            fresh
        })
        .collect()
}
