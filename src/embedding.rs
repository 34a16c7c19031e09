//! Collaborator traits and sequence shaping.
//!
//! The tokenizer and the embedding model are external collaborators: this
//! crate only defines the seams they plug into. [`pad_sequencing`] then
//! normalizes their variable-length output to the fixed `[max_len,
//! vector_size]` shape the training tensors need.

use crate::error::{DatasetError, Result};
use ndarray::Array2;

/// Token sequence produced by a tokenizer for one record.
pub type TokenSequence = Vec<String>;

/// Embedded sequence: one `vector_size`-wide row per token.
pub type EmbeddedSequence = Vec<Vec<f64>>;

/// External tokenizer collaborator.
///
/// `train` distinguishes training-time tokenization (where a tokenizer may
/// update its internal state, e.g. learn vocabulary) from inference-time
/// tokenization.
pub trait Tokenizer {
    /// Tokenize one text into an ordered token sequence.
    fn tokenize(&self, text: &str, train: bool) -> TokenSequence;
}

/// External embedding-model collaborator.
pub trait Embedder {
    /// Embed a token sequence into one fixed-width vector per token.
    fn embed(&self, tokens: &TokenSequence) -> EmbeddedSequence;
}

/// Pad or truncate an embedded sequence to exactly `max_len` rows.
///
/// Sequences longer than `max_len` keep only their first `max_len` vectors.
/// Shorter ones are copied into the leading rows of a zero matrix, leaving
/// the trailing rows as zero padding. Output shape is always
/// `[max_len, vector_size]`.
///
/// Fails with [`DatasetError::VectorSizeMismatch`] when any retained row's
/// width differs from `vector_size`.
///
/// # Example
///
/// ```
/// use intent_dataset::pad_sequencing;
///
/// // max_len=3, vector_size=2: short input is zero-padded
/// let padded = pad_sequencing(&vec![vec![1.0, 1.0], vec![2.0, 2.0]], 3, 2).unwrap();
/// assert_eq!(padded.shape(), &[3, 2]);
/// assert_eq!(padded.row(2).to_vec(), vec![0.0, 0.0]);
/// ```
pub fn pad_sequencing(
    sequence: &EmbeddedSequence,
    max_len: usize,
    vector_size: usize,
) -> Result<Array2<f64>> {
    let mut padded = Array2::<f64>::zeros((max_len, vector_size));

    for (i, vector) in sequence.iter().take(max_len).enumerate() {
        if vector.len() != vector_size {
            return Err(DatasetError::VectorSizeMismatch {
                expected: vector_size,
                actual: vector.len(),
            });
        }
        for (j, &value) in vector.iter().enumerate() {
            padded[[i, j]] = value;
        }
    }

    Ok(padded)
}
