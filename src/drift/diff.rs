//! Structural Diff Engine
//!
//! The core comparison engine that detects what appeared, vanished, or
//! changed between two snapshot documents. Sequences compare as sets:
//! two resource lists that differ only in enumeration order are identical.

use crate::inventory::Snapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Before/after pair for a changed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub previous: Value,
    pub latest: Value,
}

/// Complete structural drift report for a (previous, latest) snapshot pair.
///
/// Paths are rooted at `$`, with `.key` segments for mapping keys and
/// `[index]` segments for sequence elements. An empty report means the two
/// documents are structurally equivalent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Paths present in latest but not previous
    pub added: BTreeMap<String, Value>,
    /// Paths present in previous but not latest
    pub removed: BTreeMap<String, Value>,
    /// Paths whose value differs between the two
    pub changed: BTreeMap<String, ValueChange>,
}

impl DriftReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// The diff engine that compares snapshot documents
pub struct DiffEngine;

impl DiffEngine {
    /// Compare two documents and return all structural differences
    pub fn diff(previous: &Value, latest: &Value) -> DriftReport {
        let mut report = DriftReport::default();
        Self::walk("$", previous, latest, &mut report);
        report
    }

    fn walk(path: &str, previous: &Value, latest: &Value, report: &mut DriftReport) {
        match (previous, latest) {
            (Value::Object(prev), Value::Object(curr)) => {
                Self::diff_mappings(path, prev, curr, report)
            }
            (Value::Array(prev), Value::Array(curr)) => {
                Self::diff_sequences(path, prev, curr, report)
            }
            // Scalars, and any kind mismatch (e.g. mapping vs scalar)
            (prev, curr) => {
                if prev != curr {
                    report.changed.insert(
                        path.to_string(),
                        ValueChange {
                            previous: prev.clone(),
                            latest: curr.clone(),
                        },
                    );
                }
            }
        }
    }

    fn diff_mappings(
        path: &str,
        previous: &serde_json::Map<String, Value>,
        latest: &serde_json::Map<String, Value>,
        report: &mut DriftReport,
    ) {
        for (key, value) in latest {
            let child = format!("{path}.{key}");
            match previous.get(key) {
                Some(prev_value) => Self::walk(&child, prev_value, value, report),
                None => {
                    report.added.insert(child, value.clone());
                }
            }
        }

        for (key, value) in previous {
            if !latest.contains_key(key) {
                report.removed.insert(format!("{path}.{key}"), value.clone());
            }
        }
    }

    /// Sequences compare as multisets: each latest element consumes at most
    /// one structurally equal previous element, leftovers on either side are
    /// additions/removals.
    fn diff_sequences(path: &str, previous: &[Value], latest: &[Value], report: &mut DriftReport) {
        let mut matched = vec![false; previous.len()];

        for (index, item) in latest.iter().enumerate() {
            let counterpart = previous
                .iter()
                .enumerate()
                .position(|(j, candidate)| !matched[j] && Self::deep_eq(candidate, item));

            match counterpart {
                Some(j) => matched[j] = true,
                None => {
                    report.added.insert(format!("{path}[{index}]"), item.clone());
                }
            }
        }

        for (index, used) in matched.iter().enumerate() {
            if !used {
                report
                    .removed
                    .insert(format!("{path}[{index}]"), previous[index].clone());
            }
        }
    }

    /// Structural equality, order-insensitive for nested sequences
    fn deep_eq(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, av)| b.get(key).is_some_and(|bv| Self::deep_eq(av, bv)))
            }
            (Value::Array(a), Value::Array(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                let mut matched = vec![false; b.len()];
                a.iter().all(|av| {
                    match b
                        .iter()
                        .enumerate()
                        .position(|(j, bv)| !matched[j] && Self::deep_eq(av, bv))
                    {
                        Some(j) => {
                            matched[j] = true;
                            true
                        }
                        None => false,
                    }
                })
            }
            (a, b) => a == b,
        }
    }
}

/// Compare two snapshots and return the structural drift between them
pub fn diff_snapshots(previous: &Snapshot, latest: &Snapshot) -> DriftReport {
    DiffEngine::diff(&previous.to_document(), &latest.to_document())
}
