//! Dataset configuration management.
//!
//! Single struct covering every knob of the preparation pipeline, with
//! serialization support so an experiment's exact settings can live next to
//! its outputs.
//!
//! # Example
//!
//! ```
//! use intent_dataset::DatasetConfig;
//!
//! let config = DatasetConfig::default()
//!     .with_intent_ratio(0.8)
//!     .with_batch_size(64)
//!     .with_seed(42);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{DatasetError, Result};
use std::fs;
use std::path::Path;

/// Configuration for dataset preparation.
///
/// Controls the train/test split, batch geometry, and sequence shape shared
/// by the intent and siamese regimes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DatasetConfig {
    /// Fraction of records assigned to the train split, in (0, 1).
    ///
    /// The split point is `floor(N * intent_ratio)`; the head of the
    /// shuffled record list becomes train, the tail test.
    pub intent_ratio: f64,

    /// Number of samples per mini-batch.
    ///
    /// The final batch of an epoch may be shorter.
    pub batch_size: usize,

    /// Fixed sequence length after padding/truncation.
    ///
    /// Token sequences longer than this are truncated, shorter ones are
    /// right-padded with zero vectors.
    pub max_len: usize,

    /// Width of each embedding vector.
    ///
    /// Must match the embedder's output; mismatched rows are an error, not
    /// silently reshaped.
    pub vector_size: usize,

    /// Seed for the shuffling random source.
    ///
    /// `Some(seed)` makes a whole build reproducible; `None` seeds from
    /// entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub seed: Option<u64>,
}

impl DatasetConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the train split ratio.
    pub fn with_intent_ratio(mut self, ratio: f64) -> Self {
        self.intent_ratio = ratio;
        self
    }

    /// Set the mini-batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the padded sequence length.
    pub fn with_max_len(mut self, len: usize) -> Self {
        self.max_len = len;
        self
    }

    /// Set the embedding vector width.
    pub fn with_vector_size(mut self, size: usize) -> Self {
        self.vector_size = size;
        self
    }

    /// Set a fixed shuffle seed for reproducible builds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    ///
    /// Returns the first violated bound as [`DatasetError::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        if !(self.intent_ratio > 0.0 && self.intent_ratio < 1.0) {
            return Err(DatasetError::InvalidConfig(format!(
                "intent_ratio ({}) must be in (0, 1)",
                self.intent_ratio
            )));
        }

        if self.batch_size == 0 {
            return Err(DatasetError::InvalidConfig(
                "batch_size must be > 0".to_string(),
            ));
        }

        if self.max_len == 0 {
            return Err(DatasetError::InvalidConfig(
                "max_len must be > 0".to_string(),
            ));
        }

        if self.vector_size == 0 {
            return Err(DatasetError::InvalidConfig(
                "vector_size must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| DatasetError::ConfigFile(e.to_string()))?;
        fs::write(path.as_ref(), toml_str).map_err(|e| DatasetError::io(path.as_ref(), e))?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents =
            fs::read_to_string(path.as_ref()).map_err(|e| DatasetError::io(path.as_ref(), e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| DatasetError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json_str = serde_json::to_string_pretty(self)
            .map_err(|e| DatasetError::ConfigFile(e.to_string()))?;
        fs::write(path.as_ref(), json_str).map_err(|e| DatasetError::io(path.as_ref(), e))?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents =
            fs::read_to_string(path.as_ref()).map_err(|e| DatasetError::io(path.as_ref(), e))?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| DatasetError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            intent_ratio: 0.8,
            batch_size: 256,
            max_len: 8,
            vector_size: 64,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DatasetConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let config = DatasetConfig::default().with_intent_ratio(0.0);
        assert!(config.validate().is_err());

        let config = DatasetConfig::default().with_intent_ratio(1.0);
        assert!(config.validate().is_err());

        let config = DatasetConfig::default().with_intent_ratio(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_sizes() {
        assert!(DatasetConfig::default()
            .with_batch_size(0)
            .validate()
            .is_err());
        assert!(DatasetConfig::default().with_max_len(0).validate().is_err());
        assert!(DatasetConfig::default()
            .with_vector_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.toml");

        let config = DatasetConfig::default()
            .with_intent_ratio(0.75)
            .with_batch_size(32)
            .with_max_len(12)
            .with_vector_size(16)
            .with_seed(7);
        config.save_toml(&path).unwrap();

        let loaded = DatasetConfig::load_toml(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");

        let config = DatasetConfig::default().with_seed(99);
        config.save_json(&path).unwrap();

        let loaded = DatasetConfig::load_json(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_rejects_invalid_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "intent_ratio = 2.0\nbatch_size = 1\nmax_len = 1\nvector_size = 1\n",
        )
        .unwrap();

        assert!(DatasetConfig::load_toml(&path).is_err());
    }
}
