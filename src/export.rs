//! Dataset export for training in external frameworks.
//!
//! Writes a built split's tensors to NumPy `.npy` files with a JSON metadata
//! sidecar, so prepared datasets can be consumed from Python/PyTorch without
//! re-running tokenization and embedding.
//!
//! Export is optional: the build operations never write anything themselves.
//!
//! # Files per split
//!
//! - `{split}_data.npy` — the stacked data tensor
//! - `{split}_labels.npy` — the parallel label tensor
//! - `{split}_metadata.json` — counts, shape, label distribution, timestamp

use crate::batch::BatchLoader;
use crate::error::{DatasetError, Result};
use ndarray::{Array, Array1, RemoveAxis};
use ndarray_npy::WriteNpyExt;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Metadata sidecar written next to a split's tensors.
#[derive(Debug, Clone, Serialize)]
pub struct SplitMetadata {
    /// Split name ("train" or "test")
    pub split: String,

    /// Sample count along axis 0
    pub n_samples: usize,

    /// Full data tensor shape
    pub shape: Vec<usize>,

    /// Samples per label value
    pub label_distribution: HashMap<i64, usize>,

    /// RFC 3339 export timestamp
    pub export_timestamp: String,
}

/// Result of exporting one split.
#[derive(Debug, Clone)]
pub struct SplitExportResult {
    /// Metadata that was written
    pub metadata: SplitMetadata,

    /// Path of the data tensor file
    pub data_path: PathBuf,

    /// Path of the label tensor file
    pub labels_path: PathBuf,
}

/// Writes built splits into an output directory.
#[derive(Debug, Clone)]
pub struct DatasetExporter {
    output_dir: PathBuf,
}

impl DatasetExporter {
    /// Create an exporter rooted at `output_dir`.
    ///
    /// The directory is created on first export if absent.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Export one split's tensors and metadata.
    pub fn export_split<D: RemoveAxis>(
        &self,
        split: &str,
        data: &Array<f64, D>,
        labels: &Array1<i64>,
    ) -> Result<SplitExportResult> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| DatasetError::io(&self.output_dir, e))?;

        let data_path = self.output_dir.join(format!("{split}_data.npy"));
        let labels_path = self.output_dir.join(format!("{split}_labels.npy"));

        Self::write_npy(data, &data_path)?;
        Self::write_npy(labels, &labels_path)?;

        let mut label_distribution: HashMap<i64, usize> = HashMap::new();
        for &label in labels.iter() {
            *label_distribution.entry(label).or_insert(0) += 1;
        }

        let metadata = SplitMetadata {
            split: split.to_string(),
            n_samples: labels.len(),
            shape: data.shape().to_vec(),
            label_distribution,
            export_timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let metadata_path = self.output_dir.join(format!("{split}_metadata.json"));
        let file = File::create(&metadata_path).map_err(|e| DatasetError::io(&metadata_path, e))?;
        serde_json::to_writer_pretty(file, &metadata)
            .map_err(|e| DatasetError::Export(e.to_string()))?;

        log::info!(
            "exported split `{}` ({} samples) to {}",
            split,
            metadata.n_samples,
            self.output_dir.display()
        );

        Ok(SplitExportResult {
            metadata,
            data_path,
            labels_path,
        })
    }

    /// Export a batch loader's full split, unshuffled.
    pub fn export_loader<D: RemoveAxis>(
        &self,
        split: &str,
        loader: &BatchLoader<D>,
    ) -> Result<SplitExportResult> {
        self.export_split(split, loader.data(), loader.labels())
    }

    fn write_npy<A, D>(array: &Array<A, D>, path: &Path) -> Result<()>
    where
        A: ndarray_npy::WritableElement,
        D: ndarray::Dimension,
    {
        let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
        array
            .write_npy(file)
            .map_err(|e| DatasetError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn exports_tensors_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = DatasetExporter::new(dir.path());

        let data = Array3::<f64>::zeros((4, 3, 2));
        let labels = Array1::from_vec(vec![0i64, 1, 1, 0]);

        let result = exporter.export_split("train", &data, &labels).unwrap();

        assert!(result.data_path.exists());
        assert!(result.labels_path.exists());
        assert!(dir.path().join("train_metadata.json").exists());

        assert_eq!(result.metadata.n_samples, 4);
        assert_eq!(result.metadata.shape, vec![4, 3, 2]);
        assert_eq!(result.metadata.label_distribution[&0], 2);
        assert_eq!(result.metadata.label_distribution[&1], 2);
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/export");
        let exporter = DatasetExporter::new(&nested);

        let data = Array3::<f64>::zeros((1, 2, 2));
        let labels = Array1::from_vec(vec![0i64]);
        assert!(exporter.export_split("test", &data, &labels).is_ok());
        assert!(nested.join("test_data.npy").exists());
    }
}
