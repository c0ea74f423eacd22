//! Adversarial loss functions
//!
//! Losses come in two layers, mirroring how they are used:
//!
//! - [`wargs`] — per-argument losses. Each takes the raw discriminator output
//!   arrays (plus an options struct) and returns a scalar.
//! - [`tuple`] — model-tuple adapters. Each takes a [`crate::GanModel`] (or
//!   [`crate::CycleGanModel`] / [`crate::StarGanModel`]), validates it, pulls
//!   the required arguments out of its fields, and delegates to the matching
//!   `wargs` loss.
//!
//! # Example
//!
//! ```
//! use adversario::loss::{tuple, wargs};
//! use adversario::GanModel;
//! use ndarray::array;
//!
//! let d_real = array![[2.0_f32], [1.5]].into_dyn();
//! let d_gen = array![[-1.0_f32], [-0.5]].into_dyn();
//!
//! // Per-argument form
//! let opts = wargs::DiscriminatorLossOptions::default();
//! let w1 = wargs::wasserstein_discriminator_loss(&d_real, &d_gen, &opts).unwrap();
//!
//! // Model-tuple form
//! let noise = array![[0.0_f32], [0.0]].into_dyn();
//! let model = GanModel::new(noise.clone(), noise.clone(), noise, d_real, d_gen);
//! let w2 = tuple::wasserstein_discriminator_loss(&model, &opts).unwrap();
//!
//! assert_eq!(w1, w2);
//! ```

pub mod tuple;
pub mod wargs;

pub use wargs::{DiscriminatorLossOptions, GeneratorLossOptions, MinimaxLossOptions, Reduction};
