//! Data providers for example datasets
//!
//! Two providers, matching the two classic GAN training setups:
//!
//! - [`MnistProvider`] — shuffled batches of `[-1, 1]`-normalized images with
//!   one-hot labels from an in-memory labeled image dataset.
//! - [`ImageDataset`] — image files resolved from a glob pattern (or a file
//!   listing paths), decoded, patch-sampled and normalized into batches; used
//!   for unpaired image-to-image training.

mod images;
mod mnist;

pub use images::{
    load_image, provide_custom_data, resolve_file_pattern, sample_patch, ImageDataset,
};
pub use mnist::{provide_data, ImageClassBatch, MnistProvider};

use crate::error::{Error, Result};
use ndarray::{Array, Array2, Dimension};

// The one place the pixel scaling convention lives.
pub(crate) fn normalize_pixel(value: u8) -> f32 {
    f32::from(value) / 127.5 - 1.0
}

/// Rescale u8 pixel values in `[0, 255]` to f32 in `[-1, 1]`.
pub fn normalize_image<D: Dimension>(image: &Array<u8, D>) -> Array<f32, D> {
    image.mapv(normalize_pixel)
}

/// Inverse of [`normalize_image`], clamped to the valid pixel range.
pub fn denormalize_image<D: Dimension>(image: &Array<f32, D>) -> Array<u8, D> {
    image.mapv(|v| ((v + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8)
}

/// One-hot encode class labels.
///
/// Returns a `(labels.len(), depth)` array; a label outside `0..depth` is an
/// error.
pub fn one_hot(labels: &[usize], depth: usize) -> Result<Array2<f32>> {
    let mut encoded = Array2::zeros((labels.len(), depth));
    for (i, &label) in labels.iter().enumerate() {
        if label >= depth {
            return Err(Error::InvalidParameter(format!(
                "label {label} out of range for depth {depth}"
            )));
        }
        encoded[[i, label]] = 1.0;
    }
    Ok(encoded)
}
