//! Label indexing for intent classification.
//!
//! Maps raw intent strings to dense integer ids in first-appearance order
//! over the untouched (pre-shuffle) label column. The assignment is stable
//! and deterministic: the same label sequence always produces the same
//! index, and it is never sorted.
//!
//! # Example
//!
//! ```
//! use intent_dataset::LabelIndex;
//!
//! let index = LabelIndex::from_labels(["a", "a", "b", "a"]);
//! assert_eq!(index.id("a"), Some(0));
//! assert_eq!(index.id("b"), Some(1));
//! assert_eq!(index.num_classes(), 2);
//! ```

use serde::Serialize;
use std::collections::HashMap;

/// Mapping from raw label strings to zero-based dense class ids.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    ids: HashMap<String, usize>,
    /// Labels in id order, so id -> label lookups stay cheap.
    labels: Vec<String>,
}

/// Per-class record counts for one label column.
///
/// Serializable so it can ride along in exported metadata.
#[derive(Debug, Clone, Serialize)]
pub struct LabelStats {
    /// Distinct class count
    pub num_classes: usize,

    /// Records per class, keyed by raw label
    pub counts: HashMap<String, usize>,
}

impl LabelIndex {
    /// Build an index over a label sequence.
    ///
    /// Single left-to-right pass: the first occurrence of a new label takes
    /// the next id starting at 0, repeats reuse the assigned id.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for label in labels {
            index.insert(label.as_ref());
        }
        index
    }

    fn insert(&mut self, label: &str) -> usize {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.ids.insert(label.to_string(), id);
        self.labels.push(label.to_string());
        id
    }

    /// Id assigned to a label, if it was seen.
    pub fn id(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// Label that owns an id.
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Number of distinct classes.
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// True when no labels have been indexed.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Map a label column to its id sequence.
    ///
    /// Labels absent from the index map to a freshly missing `None`; callers
    /// that built the index over the same column can rely on all-`Some`.
    pub fn map_labels<I, S>(&self, labels: I) -> Vec<Option<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.id(label.as_ref()))
            .collect()
    }

    /// Count records per class for one label column.
    pub fn stats<I, S>(&self, labels: I) -> LabelStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for label in labels {
            *counts.entry(label.as_ref().to_string()).or_insert(0) += 1;
        }
        LabelStats {
            num_classes: self.num_classes(),
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_appearance_order() {
        let index = LabelIndex::from_labels(["a", "a", "b", "a"]);
        assert_eq!(index.id("a"), Some(0));
        assert_eq!(index.id("b"), Some(1));
        assert_eq!(index.num_classes(), 2);

        let mapped = index.map_labels(["a", "a", "b", "a"]);
        assert_eq!(mapped, vec![Some(0), Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn assignment_is_not_sorted() {
        let index = LabelIndex::from_labels(["zebra", "apple", "zebra", "mango"]);
        assert_eq!(index.id("zebra"), Some(0));
        assert_eq!(index.id("apple"), Some(1));
        assert_eq!(index.id("mango"), Some(2));
    }

    #[test]
    fn idempotent_under_reapplication() {
        let labels = ["x", "y", "x", "z", "y"];
        let first = LabelIndex::from_labels(labels);
        let second = LabelIndex::from_labels(labels);

        for label in ["x", "y", "z"] {
            assert_eq!(first.id(label), second.id(label));
        }
    }

    #[test]
    fn every_id_assigned_exactly_once() {
        let index = LabelIndex::from_labels(["a", "b", "c", "b", "a", "d"]);
        let mut seen: Vec<usize> = (0..index.num_classes())
            .map(|id| index.id(index.label(id).unwrap()).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unknown_label_maps_to_none() {
        let index = LabelIndex::from_labels(["a"]);
        assert_eq!(index.id("b"), None);
    }

    #[test]
    fn stats_count_per_class() {
        let index = LabelIndex::from_labels(["a", "a", "b"]);
        let stats = index.stats(["a", "a", "b"]);
        assert_eq!(stats.num_classes, 2);
        assert_eq!(stats.counts["a"], 2);
        assert_eq!(stats.counts["b"], 1);
    }
}
