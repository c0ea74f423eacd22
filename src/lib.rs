//! # Adversario: GAN Training Utilities
//!
//! Adversario provides the glue code for training Generative Adversarial
//! Networks: model tuples, adversarial loss functions, an experience-replay
//! style tensor pool, and data providers for example datasets.
//!
//! ## Architecture
//!
//! - **model**: Immutable records bundling one training step's tensors
//!   (`GanModel`, `CycleGanModel`, `StarGanModel`) and loss pairs (`GanLoss`)
//! - **loss**: Adversarial losses, both per-argument (`loss::wargs`) and as
//!   model-tuple adapters (`loss::tuple`)
//! - **features**: Training stabilizers, notably the randomized `TensorPool`
//! - **data**: Batch providers for MNIST-style and image-directory datasets
//! - **train**: Alternating generator/discriminator training loop
//!
//! ## Example
//!
//! ```
//! use adversario::loss::tuple;
//! use adversario::loss::wargs::DiscriminatorLossOptions;
//! use adversario::GanModel;
//! use ndarray::array;
//!
//! let model = GanModel::new(
//!     array![[0.0_f32]].into_dyn(),
//!     array![[0.4_f32]].into_dyn(),
//!     array![[0.6_f32]].into_dyn(),
//!     array![[0.8_f32]].into_dyn(),
//!     array![[0.2_f32]].into_dyn(),
//! );
//!
//! let opts = DiscriminatorLossOptions::default();
//! let loss = tuple::wasserstein_discriminator_loss(&model, &opts).unwrap();
//! assert!(loss.is_finite());
//! ```

pub mod data;
pub mod features;
pub mod loss;
pub mod model;
pub mod train;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use features::TensorPool;
pub use model::{CycleGanLoss, CycleGanModel, GanLoss, GanModel, StarGanModel};
