//! Image-directory data provider
//!
//! Resolves image files from glob patterns, decodes them, samples fixed-size
//! patches and yields normalized `(batch, patch, patch, 3)` arrays. Built for
//! unpaired image-to-image training, where each domain is one file pattern.

use super::normalize_pixel;
use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;
use ndarray::Array4;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Resolve a file pattern to a sorted list of image paths.
///
/// Three forms are accepted:
/// - a glob pattern, e.g. `data/horses/*.jpg`
/// - a path to a single image file
/// - a path to a plain file containing newline-separated image paths
///
/// A pattern matching nothing is an error.
pub fn resolve_file_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    if path.is_file() {
        if has_image_extension(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        let contents = std::fs::read_to_string(path)?;
        let files: Vec<PathBuf> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        if files.is_empty() {
            return Err(Error::NotFound(pattern.to_string()));
        }
        return Ok(files);
    }

    let mut files: Vec<PathBuf> = glob::glob(pattern)?
        .filter_map(std::result::Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(Error::NotFound(pattern.to_string()));
    }
    Ok(files)
}

/// Decode an image file to RGB. Grayscale inputs come back with the channel
/// replicated across all three.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Sample a random `patch_size` x `patch_size` crop.
///
/// Images smaller than the patch in either dimension are bilinearly resized
/// up first, so the output always has the full patch size.
pub fn sample_patch(image: &RgbImage, patch_size: u32, rng: &mut StdRng) -> RgbImage {
    let (w, h) = image.dimensions();
    let resized;
    let source = if w < patch_size || h < patch_size {
        resized = imageops::resize(
            image,
            w.max(patch_size),
            h.max(patch_size),
            FilterType::Triangle,
        );
        &resized
    } else {
        image
    };

    let (w, h) = source.dimensions();
    let x = rng.random_range(0..=w - patch_size);
    let y = rng.random_range(0..=h - patch_size);
    imageops::crop_imm(source, x, y, patch_size, patch_size).to_image()
}

/// Batch provider over the image files matching one pattern.
///
/// Each call to [`ImageDataset::next_batch`] decodes the next `batch_size`
/// files, samples one patch per image and normalizes pixels to `[-1, 1]`.
/// The file order is reshuffled every full pass.
#[derive(Debug, Clone)]
pub struct ImageDataset {
    files: Vec<PathBuf>,
    batch_size: usize,
    patch_size: u32,
    order: Vec<usize>,
    cursor: usize,
    rng: StdRng,
}

impl ImageDataset {
    /// Create a dataset from a file pattern.
    pub fn from_pattern(pattern: &str, batch_size: usize, patch_size: u32) -> Result<Self> {
        Self::build(pattern, batch_size, patch_size, StdRng::from_os_rng())
    }

    /// Create a dataset with a seed for reproducible shuffling and patches.
    pub fn from_pattern_with_seed(
        pattern: &str,
        batch_size: usize,
        patch_size: u32,
        seed: u64,
    ) -> Result<Self> {
        Self::build(pattern, batch_size, patch_size, StdRng::seed_from_u64(seed))
    }

    fn build(pattern: &str, batch_size: usize, patch_size: u32, mut rng: StdRng) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidParameter(
                "batch_size must be positive".to_string(),
            ));
        }
        if patch_size == 0 {
            return Err(Error::InvalidParameter(
                "patch_size must be positive".to_string(),
            ));
        }
        let files = resolve_file_pattern(pattern)?;
        let mut order: Vec<usize> = (0..files.len()).collect();
        {
            use rand::seq::SliceRandom;
            order.shuffle(&mut rng);
        }
        Ok(Self {
            files,
            batch_size,
            patch_size,
            order,
            cursor: 0,
            rng,
        })
    }

    /// Number of files backing the dataset.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the dataset has no files (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Decode and assemble the next batch, shape `(batch, patch, patch, 3)`,
    /// pixels in `[-1, 1]`. Wraps around the file list, reshuffling each pass.
    pub fn next_batch(&mut self) -> Result<Array4<f32>> {
        let patch = self.patch_size as usize;
        let mut batch = Array4::zeros((self.batch_size, patch, patch, 3));

        for i in 0..self.batch_size {
            if self.cursor >= self.order.len() {
                use rand::seq::SliceRandom;
                self.order.shuffle(&mut self.rng);
                self.cursor = 0;
            }
            let file = &self.files[self.order[self.cursor]];
            self.cursor += 1;

            let decoded = load_image(file)?;
            let sampled = sample_patch(&decoded, self.patch_size, &mut self.rng);
            for (x, y, pixel) in sampled.enumerate_pixels() {
                for c in 0..3 {
                    batch[[i, y as usize, x as usize, c]] = normalize_pixel(pixel[c]);
                }
            }
        }
        Ok(batch)
    }
}

/// One batch per pattern, for multi-domain training (e.g. CycleGAN with one
/// pattern per side).
pub fn provide_custom_data<S: AsRef<str>>(
    image_file_patterns: &[S],
    batch_size: usize,
    patch_size: u32,
) -> Result<Vec<Array4<f32>>> {
    image_file_patterns
        .iter()
        .map(|pattern| {
            ImageDataset::from_pattern(pattern.as_ref(), batch_size, patch_size)?.next_batch()
        })
        .collect()
}
