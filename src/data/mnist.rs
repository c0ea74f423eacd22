//! MNIST-style data provider

use super::normalize_image;
use crate::error::{Error, Result};
use ndarray::{s, Array2, Array4};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// MNIST image side length.
pub const IMAGE_SIZE: usize = 28;
/// Number of MNIST classes.
pub const NUM_CLASSES: usize = 10;

/// One batch of images with one-hot labels.
///
/// Images are `(batch, 28, 28, 1)` in `[-1, 1]`; labels are `(batch, 10)`.
#[derive(Debug, Clone)]
pub struct ImageClassBatch {
    /// Normalized image batch.
    pub images: Array4<f32>,
    /// One-hot label batch.
    pub labels: Array2<f32>,
}

/// Shuffled batch provider over an in-memory MNIST-style dataset.
///
/// # Example
///
/// ```
/// use adversario::data::MnistProvider;
/// use ndarray::Array4;
///
/// let images = Array4::<u8>::zeros((32, 28, 28, 1));
/// let labels = vec![1usize; 32];
/// let mut provider = MnistProvider::with_seed(images, labels, 8, 42).unwrap();
///
/// let batches = provider.batches();
/// assert_eq!(batches.len(), 4);
/// assert_eq!(batches[0].images.shape(), &[8, 28, 28, 1]);
/// assert_eq!(batches[0].labels.shape(), &[8, 10]);
/// ```
#[derive(Debug, Clone)]
pub struct MnistProvider {
    images: Array4<u8>,
    labels: Vec<usize>,
    batch_size: usize,
    rng: StdRng,
}

impl MnistProvider {
    /// Create a provider over raw u8 images of shape `(N, 28, 28, 1)`.
    pub fn new(images: Array4<u8>, labels: Vec<usize>, batch_size: usize) -> Result<Self> {
        Self::build(images, labels, batch_size, StdRng::from_os_rng())
    }

    /// Create a provider with a seed for reproducible shuffling.
    pub fn with_seed(
        images: Array4<u8>,
        labels: Vec<usize>,
        batch_size: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::build(images, labels, batch_size, StdRng::seed_from_u64(seed))
    }

    fn build(
        images: Array4<u8>,
        labels: Vec<usize>,
        batch_size: usize,
        rng: StdRng,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidParameter(
                "batch_size must be positive".to_string(),
            ));
        }
        let shape = images.shape();
        if shape[1] != IMAGE_SIZE || shape[2] != IMAGE_SIZE || shape[3] != 1 {
            return Err(Error::ShapeMismatch {
                expected: vec![shape[0], IMAGE_SIZE, IMAGE_SIZE, 1],
                got: shape.to_vec(),
            });
        }
        if shape[0] != labels.len() {
            return Err(Error::InvalidParameter(format!(
                "{} images but {} labels",
                shape[0],
                labels.len()
            )));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= NUM_CLASSES) {
            return Err(Error::InvalidParameter(format!(
                "label {bad} out of range for {NUM_CLASSES} classes"
            )));
        }
        Ok(Self {
            images,
            labels,
            batch_size,
            rng,
        })
    }

    /// Number of examples in the dataset.
    pub fn num_examples(&self) -> usize {
        self.labels.len()
    }

    /// One epoch of shuffled batches. A trailing partial batch is dropped so
    /// every batch has the full `batch_size`.
    pub fn batches(&mut self) -> Vec<ImageClassBatch> {
        let mut order: Vec<usize> = (0..self.num_examples()).collect();
        order.shuffle(&mut self.rng);

        order
            .chunks_exact(self.batch_size)
            .map(|chunk| self.assemble(chunk))
            .collect()
    }

    fn assemble(&self, indices: &[usize]) -> ImageClassBatch {
        let mut images = Array4::zeros((indices.len(), IMAGE_SIZE, IMAGE_SIZE, 1));
        let mut labels = Array2::zeros((indices.len(), NUM_CLASSES));
        for (i, &idx) in indices.iter().enumerate() {
            let example = self.images.slice(s![idx, .., .., ..]).to_owned();
            images
                .slice_mut(s![i, .., .., ..])
                .assign(&normalize_image(&example));
            // Labels were range-checked at construction
            labels[[i, self.labels[idx]]] = 1.0;
        }
        ImageClassBatch { images, labels }
    }
}

/// Convenience wrapper: one epoch of batches from raw images and labels.
pub fn provide_data(
    images: Array4<u8>,
    labels: Vec<usize>,
    batch_size: usize,
    seed: u64,
) -> Result<Vec<ImageClassBatch>> {
    Ok(MnistProvider::with_seed(images, labels, batch_size, seed)?.batches())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> (Array4<u8>, Vec<usize>) {
        let mut images = Array4::<u8>::zeros((n, IMAGE_SIZE, IMAGE_SIZE, 1));
        for i in 0..n {
            images[[i, 0, 0, 0]] = i as u8;
        }
        let labels = (0..n).map(|i| i % NUM_CLASSES).collect();
        (images, labels)
    }

    #[test]
    fn test_batch_shapes_and_range() {
        let (images, labels) = dataset(20);
        let mut provider = MnistProvider::with_seed(images, labels, 5, 42).unwrap();

        let batches = provider.batches();
        assert_eq!(batches.len(), 4);
        for batch in &batches {
            assert_eq!(batch.images.shape(), &[5, IMAGE_SIZE, IMAGE_SIZE, 1]);
            assert_eq!(batch.labels.shape(), &[5, NUM_CLASSES]);
            assert!(batch.images.iter().all(|&v| v.abs() <= 1.0));
            // Each label row is one-hot
            for row in batch.labels.rows() {
                assert_eq!(row.sum(), 1.0);
            }
        }
    }

    #[test]
    fn test_partial_batch_dropped() {
        let (images, labels) = dataset(13);
        let mut provider = MnistProvider::with_seed(images, labels, 5, 42).unwrap();
        assert_eq!(provider.batches().len(), 2);
    }

    #[test]
    fn test_epochs_are_reshuffled() {
        let (images, labels) = dataset(30);
        let mut provider = MnistProvider::with_seed(images, labels, 30, 42).unwrap();

        let first: Vec<f32> = provider.batches()[0]
            .images
            .slice(s![.., 0, 0, 0])
            .to_vec();
        let second: Vec<f32> = provider.batches()[0]
            .images
            .slice(s![.., 0, 0, 0])
            .to_vec();

        // Same multiset of examples, near-certainly different order
        assert_ne!(first, second);
        let mut a = first.clone();
        let mut b = second.clone();
        a.sort_by(f32::total_cmp);
        b.sort_by(f32::total_cmp);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_wrong_image_shape() {
        let images = Array4::<u8>::zeros((4, 32, 32, 1));
        let labels = vec![0; 4];
        assert!(MnistProvider::new(images, labels, 2).is_err());
    }

    #[test]
    fn test_rejects_label_count_mismatch() {
        let (images, _) = dataset(4);
        assert!(MnistProvider::new(images, vec![0; 3], 2).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_label() {
        let (images, _) = dataset(4);
        assert!(MnistProvider::new(images, vec![0, 1, 2, 10], 2).is_err());
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let (images, labels) = dataset(4);
        assert!(MnistProvider::new(images, labels, 0).is_err());
    }

    #[test]
    fn test_provide_data_is_deterministic_per_seed() {
        let (images, labels) = dataset(10);
        let a = provide_data(images.clone(), labels.clone(), 5, 7).unwrap();
        let b = provide_data(images, labels, 5, 7).unwrap();
        assert_eq!(a[0].images, b[0].images);
        assert_eq!(a[0].labels, b[0].labels);
    }
}
