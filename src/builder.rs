//! Dataset build orchestration.
//!
//! [`DatasetBuilder`] wires the collaborators together: CSV ingestion, label
//! indexing, tokenization, shuffled train/test splitting, embedding with
//! pad/truncate shaping, siamese pair assembly, and batch-loader wrapping.
//! Everything is staged sequentially within one call; any failure aborts the
//! whole build.
//!
//! # Example
//!
//! ```ignore
//! use intent_dataset::{DatasetBuilder, DatasetConfig};
//!
//! let config = DatasetConfig::default().with_seed(42);
//! let builder = DatasetBuilder::new(config, tokenizer)?;
//!
//! let (mut train, mut test) = builder.intent_train(&embedder, "dataset.csv")?;
//! for (batch, labels) in train.epoch() {
//!     // feed to the classifier
//! }
//! ```

use crate::batch::BatchLoader;
use crate::config::DatasetConfig;
use crate::corpus::Corpus;
use crate::embedding::{pad_sequencing, Embedder, TokenSequence, Tokenizer};
use crate::error::{DatasetError, Result};
use crate::labeling::LabelIndex;
use crate::pairs::{adjacency_pairs, parity_trim, PairSet};
use ndarray::{Array1, Array3, Array4, Axis, Ix3, Ix4};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// One tokenized record: the token sequence plus its dense label id.
type TokenizedRecord = (TokenSequence, usize);

/// Tokenized corpus with its label mapping, the output of
/// [`DatasetBuilder::embed_train`].
#[derive(Debug, Clone)]
pub struct EmbeddedCorpus {
    /// Token sequences, one per CSV row, in file order
    pub data: Vec<TokenSequence>,

    /// Dense label ids parallel to `data`
    pub labels: Vec<usize>,

    /// Label string -> id mapping over the full label column
    pub label_index: LabelIndex,
}

/// Builds training datasets for the intent and siamese regimes.
///
/// The tokenizer and configuration are injected at construction; the
/// embedder is passed per call since different regimes may embed with
/// different models.
#[derive(Debug)]
pub struct DatasetBuilder<T: Tokenizer> {
    config: DatasetConfig,
    tokenizer: T,
}

impl<T: Tokenizer> DatasetBuilder<T> {
    /// Create a builder from a validated configuration and a tokenizer.
    pub fn new(config: DatasetConfig, tokenizer: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, tokenizer })
    }

    /// The builder's configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Load and tokenize a CSV corpus.
    ///
    /// Builds the label index over the full (pre-shuffle) label column, maps
    /// every label to its dense id, and tokenizes every question
    /// independently in row order with `train = true`.
    pub fn embed_train<P: AsRef<Path>>(&self, path: P) -> Result<EmbeddedCorpus> {
        let corpus = Corpus::load(path)?;

        let label_index = LabelIndex::from_labels(corpus.intents());
        let labels: Vec<usize> = corpus
            .intents()
            .map(|intent| {
                // Index was built over this exact column, lookup can't miss.
                label_index.id(intent).unwrap_or_default()
            })
            .collect();

        let data: Vec<TokenSequence> = corpus
            .records()
            .iter()
            .map(|record| self.tokenizer.tokenize(&record.question, true))
            .collect();

        log::info!(
            "tokenized {} records across {} intent classes",
            data.len(),
            label_index.num_classes()
        );
        if log::log_enabled!(log::Level::Debug) {
            let stats = label_index.stats(corpus.intents());
            log::debug!("class distribution: {:?}", stats.counts);
        }

        Ok(EmbeddedCorpus {
            data,
            labels,
            label_index,
        })
    }

    /// Build shuffled train/test batch loaders for the intent classifier.
    ///
    /// Records are shuffled, split at `floor(N * intent_ratio)`, embedded,
    /// padded to `[max_len, vector_size]`, and stacked into
    /// `[count, max_len, vector_size]` tensors per split.
    pub fn intent_train<E, P>(
        &self,
        embedder: &E,
        path: P,
    ) -> Result<(BatchLoader<Ix3>, BatchLoader<Ix3>)>
    where
        E: Embedder,
        P: AsRef<Path>,
    {
        let mut rng = self.build_rng();
        let (train_records, test_records) = self.load_and_split(path, &mut rng)?;

        let (train_data, train_labels) = self.stack_records(embedder, &train_records, "train")?;
        let (test_data, test_labels) = self.stack_records(embedder, &test_records, "test")?;

        let train = BatchLoader::new(
            train_data,
            train_labels,
            self.config.batch_size,
            self.loader_seed(&mut rng),
        )?;
        let test = BatchLoader::new(
            test_data,
            test_labels,
            self.config.batch_size,
            self.loader_seed(&mut rng),
        )?;

        Ok((train, test))
    }

    /// Build shuffled train/test batch loaders for the siamese model.
    ///
    /// After the same load/shuffle/split as [`DatasetBuilder::intent_train`],
    /// each split is independently trimmed to even length, paired by
    /// adjacency, and stacked into `[n_pairs, 2, max_len, vector_size]`
    /// tensors with binary same-intent labels.
    pub fn siamese_train<E, P>(
        &self,
        embedder: &E,
        path: P,
    ) -> Result<(BatchLoader<Ix4>, BatchLoader<Ix4>)>
    where
        E: Embedder,
        P: AsRef<Path>,
    {
        let mut rng = self.build_rng();
        let (mut train_records, mut test_records) = self.load_and_split(path, &mut rng)?;

        parity_trim(&mut train_records);
        parity_trim(&mut test_records);

        let train_pairs = adjacency_pairs(&train_records);
        let test_pairs = adjacency_pairs(&test_records);

        let (train_data, train_labels) = self.stack_pairs(embedder, &train_pairs, "train")?;
        let (test_data, test_labels) = self.stack_pairs(embedder, &test_pairs, "test")?;

        let train = BatchLoader::new(
            train_data,
            train_labels,
            self.config.batch_size,
            self.loader_seed(&mut rng),
        )?;
        let test = BatchLoader::new(
            test_data,
            test_labels,
            self.config.batch_size,
            self.loader_seed(&mut rng),
        )?;

        Ok((train, test))
    }

    /// Shuffle the tokenized corpus and split it at
    /// `floor(N * intent_ratio)`.
    fn load_and_split<P: AsRef<Path>>(
        &self,
        path: P,
        rng: &mut StdRng,
    ) -> Result<(Vec<TokenizedRecord>, Vec<TokenizedRecord>)> {
        let corpus = self.embed_train(path)?;
        let mut records: Vec<TokenizedRecord> =
            corpus.data.into_iter().zip(corpus.labels).collect();

        records.shuffle(rng);

        let split_point = (records.len() as f64 * self.config.intent_ratio) as usize;
        let test_records = records.split_off(split_point);
        let train_records = records;

        log::info!(
            "split {} records into {} train / {} test",
            train_records.len() + test_records.len(),
            train_records.len(),
            test_records.len()
        );

        if train_records.is_empty() {
            return Err(DatasetError::empty(
                "train",
                format!("ratio {} over too few records", self.config.intent_ratio),
            ));
        }
        if test_records.is_empty() {
            return Err(DatasetError::empty(
                "test",
                format!("ratio {} over too few records", self.config.intent_ratio),
            ));
        }

        Ok((train_records, test_records))
    }

    /// Embed, pad, and stack one split's records into
    /// `[count, max_len, vector_size]` plus a `[count]` label tensor.
    fn stack_records<E: Embedder>(
        &self,
        embedder: &E,
        records: &[TokenizedRecord],
        split: &'static str,
    ) -> Result<(Array3<f64>, Array1<i64>)> {
        if records.is_empty() {
            return Err(DatasetError::empty(split, "nothing to stack"));
        }

        let mut data = Array3::<f64>::zeros((
            records.len(),
            self.config.max_len,
            self.config.vector_size,
        ));
        let mut labels = Vec::with_capacity(records.len());

        for (i, (tokens, label)) in records.iter().enumerate() {
            let padded = pad_sequencing(
                &embedder.embed(tokens),
                self.config.max_len,
                self.config.vector_size,
            )?;
            data.index_axis_mut(Axis(0), i).assign(&padded);
            labels.push(*label as i64);
        }

        Ok((data, Array1::from_vec(labels)))
    }

    /// Embed, pad, and stack one split's pairs into
    /// `[n_pairs, 2, max_len, vector_size]` plus binary labels, positives
    /// before negatives.
    fn stack_pairs<E: Embedder>(
        &self,
        embedder: &E,
        pairs: &PairSet<TokenSequence>,
        split: &'static str,
    ) -> Result<(Array4<f64>, Array1<i64>)> {
        if pairs.is_empty() {
            return Err(DatasetError::empty(split, "pairing produced no pairs"));
        }

        let mut data = Array4::<f64>::zeros((
            pairs.len(),
            2,
            self.config.max_len,
            self.config.vector_size,
        ));
        let mut labels = Vec::with_capacity(pairs.len());

        let labeled = pairs
            .positive
            .iter()
            .map(|pair| (pair, 1i64))
            .chain(pairs.negative.iter().map(|pair| (pair, 0i64)));

        for (i, ((first, second), label)) in labeled.enumerate() {
            let sides = [first, second];
            for (side, tokens) in sides.into_iter().enumerate() {
                let padded = pad_sequencing(
                    &embedder.embed(tokens),
                    self.config.max_len,
                    self.config.vector_size,
                )?;
                data.index_axis_mut(Axis(0), i)
                    .index_axis_mut(Axis(0), side)
                    .assign(&padded);
            }
            labels.push(label);
        }

        Ok((data, Array1::from_vec(labels)))
    }

    /// Random source for shuffling, seeded when the config asks for
    /// reproducibility.
    fn build_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Derive a loader seed from the build RNG so seeded builds stay
    /// reproducible end to end.
    fn loader_seed(&self, rng: &mut StdRng) -> Option<u64> {
        self.config.seed.map(|_| rng.gen())
    }
}
