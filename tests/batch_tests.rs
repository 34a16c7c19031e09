//! Batch iteration and export integration tests.

use intent_dataset::{BatchLoader, DatasetExporter};
use ndarray::{Array1, Array3};
use ndarray_npy::ReadNpyExt;
use std::fs::File;

fn loader(n: usize, batch_size: usize, seed: u64) -> BatchLoader<ndarray::Ix3> {
    let data = Array3::from_shape_fn((n, 3, 2), |(i, _, _)| i as f64);
    let labels = Array1::from_iter((0..n).map(|i| i as i64));
    BatchLoader::new(data, labels, batch_size, Some(seed)).unwrap()
}

#[test]
fn epoch_covers_every_sample_exactly_once() {
    let mut loader = loader(17, 5, 11);
    let mut seen: Vec<i64> = loader
        .epoch()
        .flat_map(|(_, labels)| labels.to_vec())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..17).collect::<Vec<i64>>());
}

#[test]
fn short_final_batch_is_yielded() {
    let mut loader = loader(17, 5, 12);
    let sizes: Vec<usize> = loader.epoch().map(|(batch, _)| batch.shape()[0]).collect();
    assert_eq!(sizes, vec![5, 5, 5, 2]);
}

#[test]
fn consecutive_epochs_use_different_orders() {
    let mut loader = loader(50, 50, 13);
    let first: Vec<i64> = loader.epoch().flat_map(|(_, l)| l.to_vec()).collect();
    let second: Vec<i64> = loader.epoch().flat_map(|(_, l)| l.to_vec()).collect();
    assert_ne!(first, second);

    let mut sorted = first.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..50).collect::<Vec<i64>>());
}

#[test]
fn exported_tensors_round_trip_through_npy() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = DatasetExporter::new(dir.path());

    let loader = loader(6, 2, 14);
    let result = exporter.export_loader("train", &loader).unwrap();

    let data = Array3::<f64>::read_npy(File::open(&result.data_path).unwrap()).unwrap();
    let labels = Array1::<i64>::read_npy(File::open(&result.labels_path).unwrap()).unwrap();

    assert_eq!(&data, loader.data());
    assert_eq!(&labels, loader.labels());
    assert_eq!(result.metadata.shape, vec![6, 3, 2]);
}
