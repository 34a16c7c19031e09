//! Adjacency pair construction for the siamese regime.
//!
//! Pairs are formed between temporally adjacent records of an already
//! shuffled split: record `i` against record `i-1`, the first record
//! yielding no pair. Equal label ids produce a positive pair, unequal a
//! negative one. This is adjacency-based by design, never exhaustive: a
//! split of `n` records yields at most `n - 1` pairs, bucketed by the
//! label-equality outcome rather than balanced.

/// Positive and negative pair buckets built from one split.
#[derive(Debug, Clone)]
pub struct PairSet<T> {
    /// Pairs whose records share an intent class (label 1)
    pub positive: Vec<(T, T)>,

    /// Pairs whose records differ in intent class (label 0)
    pub negative: Vec<(T, T)>,
}

impl<T> PairSet<T> {
    /// Total pairs across both buckets.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// True when neither bucket holds a pair.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Drop one record from an odd-sized split so pairing leaves no unpaired
/// tail. An even split is returned untouched.
///
/// The trim references the split's own length: an odd split loses its last
/// record.
pub fn parity_trim<T>(records: &mut Vec<T>) {
    if records.len() % 2 != 0 {
        records.pop();
    }
}

/// Build adjacency pairs over a shuffled split.
///
/// Walks the split once, comparing each record's label to its predecessor's.
pub fn adjacency_pairs<T: Clone>(records: &[(T, usize)]) -> PairSet<T> {
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for window in records.windows(2) {
        let (ref prev_data, prev_label) = window[0];
        let (ref data, label) = window[1];
        if prev_label == label {
            positive.push((prev_data.clone(), data.clone()));
        } else {
            negative.push((prev_data.clone(), data.clone()));
        }
    }

    log::debug!(
        "built {} positive / {} negative adjacency pairs from {} records",
        positive.len(),
        negative.len(),
        records.len()
    );

    PairSet { positive, negative }
}
