//! Data-provider tests against real files on disk.

use adversario::data::{
    normalize_image, provide_custom_data, resolve_file_pattern, ImageDataset, MnistProvider,
};
use image::{Rgb, RgbImage};
use ndarray::Array4;
use std::io::Write;
use tempfile::TempDir;

fn image_dir(count: usize, width: u32, height: u32) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..count {
        let value = (i * 20) as u8;
        let image = RgbImage::from_pixel(width, height, Rgb([value, value, value]));
        image.save(dir.path().join(format!("img_{i:03}.png"))).unwrap();
    }
    dir
}

#[test]
fn test_glob_pattern_resolves_sorted() {
    let dir = image_dir(5, 8, 8);
    let pattern = format!("{}/*.png", dir.path().display());

    let files = resolve_file_pattern(&pattern).unwrap();
    assert_eq!(files.len(), 5);
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
}

#[test]
fn test_list_file_pattern() {
    let dir = image_dir(3, 8, 8);
    let list_path = dir.path().join("files.txt");
    let mut list = std::fs::File::create(&list_path).unwrap();
    for i in 0..3 {
        writeln!(list, "{}/img_{i:03}.png", dir.path().display()).unwrap();
    }
    drop(list);

    let files = resolve_file_pattern(list_path.to_str().unwrap()).unwrap();
    assert_eq!(files.len(), 3);
}

#[test]
fn test_image_dataset_batch_shape_and_range() {
    let dir = image_dir(6, 16, 16);
    let pattern = format!("{}/*.png", dir.path().display());

    let mut dataset = ImageDataset::from_pattern_with_seed(&pattern, 4, 8, 42).unwrap();
    assert_eq!(dataset.len(), 6);

    let batch = dataset.next_batch().unwrap();
    assert_eq!(batch.shape(), &[4, 8, 8, 3]);
    assert!(batch.iter().all(|&v| (-1.0..=1.0).contains(&v)));
}

#[test]
fn test_image_batch_uses_shared_normalization() {
    let dir = tempfile::tempdir().unwrap();
    let image = RgbImage::from_pixel(8, 8, Rgb([100, 100, 100]));
    image.save(dir.path().join("flat.png")).unwrap();
    let pattern = format!("{}/*.png", dir.path().display());

    let mut dataset = ImageDataset::from_pattern_with_seed(&pattern, 1, 8, 42).unwrap();
    let batch = dataset.next_batch().unwrap();

    let expected = normalize_image(&ndarray::arr1(&[100u8]))[0];
    assert!(batch.iter().all(|&v| (v - expected).abs() < 1e-6));
}

#[test]
fn test_image_dataset_upscales_small_images() {
    let dir = image_dir(2, 4, 4);
    let pattern = format!("{}/*.png", dir.path().display());

    let mut dataset = ImageDataset::from_pattern_with_seed(&pattern, 2, 8, 42).unwrap();
    let batch = dataset.next_batch().unwrap();
    assert_eq!(batch.shape(), &[2, 8, 8, 3]);
}

#[test]
fn test_image_dataset_wraps_around() {
    let dir = image_dir(3, 8, 8);
    let pattern = format!("{}/*.png", dir.path().display());

    // batch_size > file count forces a wrap within one batch
    let mut dataset = ImageDataset::from_pattern_with_seed(&pattern, 5, 8, 42).unwrap();
    let batch = dataset.next_batch().unwrap();
    assert_eq!(batch.shape(), &[5, 8, 8, 3]);
}

#[test]
fn test_provide_custom_data_one_batch_per_pattern() {
    let dir_a = image_dir(4, 8, 8);
    let dir_b = image_dir(4, 8, 8);
    let patterns = [
        format!("{}/*.png", dir_a.path().display()),
        format!("{}/*.png", dir_b.path().display()),
    ];

    let batches = provide_custom_data(&patterns, 2, 8).unwrap();
    assert_eq!(batches.len(), 2);
    for batch in &batches {
        assert_eq!(batch.shape(), &[2, 8, 8, 3]);
    }
}

#[test]
fn test_mnist_epoch_covers_dataset() {
    let n = 24;
    let mut images = Array4::<u8>::zeros((n, 28, 28, 1));
    for i in 0..n {
        images[[i, 5, 5, 0]] = 255;
    }
    let labels: Vec<usize> = (0..n).map(|i| i % 10).collect();

    let mut provider = MnistProvider::with_seed(images, labels, 6, 42).unwrap();
    let batches = provider.batches();
    assert_eq!(batches.len(), 4);

    // Every example appears exactly once per epoch.
    let total: usize = batches.iter().map(|b| b.labels.shape()[0]).sum();
    assert_eq!(total, n);
    for batch in &batches {
        assert!(batch.images.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }
}
