//! Thread-safe accumulation of positive outcomes.

use crate::scanner::traits::{Finding, ProbeOutcome};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Collects positive outcomes from any number of concurrent workers.
///
/// Only `record` and `finalize` are exposed; the container itself never
/// leaves the lock until the aggregator is consumed.
#[derive(Debug)]
pub struct Aggregator<F: Finding> {
    entries: Mutex<BTreeMap<F::Key, F>>,
}

impl<F: Finding> Aggregator<F> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Retain `outcome` if it is positive.
    ///
    /// Returns `true` when a new entry was stored. A second positive outcome
    /// for an already-recorded unit is ignored.
    pub fn record(&self, outcome: ProbeOutcome<F>) -> bool {
        let Some(finding) = outcome.into_finding() else {
            return false;
        };

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.entry(finding.key()) {
            Entry::Vacant(slot) => {
                slot.insert(finding);
                true
            }
            Entry::Occupied(slot) => {
                warn!(unit = ?slot.key(), "duplicate outcome ignored");
                false
            }
        }
    }

    /// Number of positive outcomes retained so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the aggregator into the final result set, sorted by unit.
    pub fn finalize(self) -> ResultSet<F> {
        let entries = self
            .entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        ResultSet {
            entries: entries.into_values().collect(),
        }
    }
}

impl<F: Finding> Default for Aggregator<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable, unit-sorted collection of positive outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet<F> {
    entries: Vec<F>,
}

impl<F> ResultSet<F> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.entries
    }
}

impl<'a, F> IntoIterator for &'a ResultSet<F> {
    type Item = &'a F;
    type IntoIter = std::slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
