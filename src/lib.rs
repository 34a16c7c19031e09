//! Intent Dataset
//!
//! Dataset preparation for intent-classification and siamese
//! pair-similarity training.
//!
//! # Overview
//!
//! This library turns a CSV file of labeled questions into shuffled,
//! mini-batched training tensors. It composes, in order:
//!
//! 1. CSV ingestion (`intent` + `question` columns)
//! 2. Label indexing in first-appearance order
//! 3. Tokenization via an injected collaborator
//! 4. Shuffled train/test splitting by a configured ratio
//! 5. Embedding with pad/truncate shaping to `[max_len, vector_size]`
//! 6. For the siamese regime, adjacency-based positive/negative pairing
//! 7. Per-epoch reshuffled mini-batch iteration
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Intent Dataset                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │  corpus     - CSV ingestion with required-column checks        │
//! │  labeling   - label string -> dense id mapping                 │
//! │  embedding  - tokenizer/embedder seams, pad/truncate           │
//! │  pairs      - adjacency pairing for the siamese regime         │
//! │  builder    - shuffle, split, embed, stack                     │
//! │  batch      - shuffled mini-batch iteration per split          │
//! │  export     - .npy + metadata export of built splits           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use intent_dataset::{DatasetBuilder, DatasetConfig};
//!
//! let config = DatasetConfig::default()
//!     .with_intent_ratio(0.8)
//!     .with_seed(42);
//! let builder = DatasetBuilder::new(config, my_tokenizer)?;
//!
//! let (mut train, mut test) = builder.intent_train(&my_embedder, "dataset.csv")?;
//! for (batch, labels) in train.epoch() {
//!     // batch: [<=batch_size, max_len, vector_size]
//! }
//! ```
//!
//! All operations are single-threaded and synchronous; a failure on any
//! record aborts the whole build.

pub mod batch;
pub mod builder;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod export;
pub mod labeling;
pub mod pairs;

// Re-exports - Configuration
pub use config::DatasetConfig;

// Re-exports - Errors
pub use error::{DatasetError, Result};

// Re-exports - Corpus
pub use corpus::{Corpus, Record, INTENT_COLUMN, QUESTION_COLUMN};

// Re-exports - Labeling
pub use labeling::{LabelIndex, LabelStats};

// Re-exports - Embedding
pub use embedding::{pad_sequencing, EmbeddedSequence, Embedder, TokenSequence, Tokenizer};

// Re-exports - Pairs
pub use pairs::{adjacency_pairs, parity_trim, PairSet};

// Re-exports - Builder
pub use builder::{DatasetBuilder, EmbeddedCorpus};

// Re-exports - Batching
pub use batch::{BatchLoader, Epoch};

// Re-exports - Export
pub use export::{DatasetExporter, SplitExportResult, SplitMetadata};
