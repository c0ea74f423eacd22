//! Model tuples for GAN training
//!
//! A model tuple bundles everything one training step needs to compute its
//! losses: the generator's inputs and outputs, the real data, and the
//! discriminator's outputs on both. Tuples are value types, created once per
//! step and never mutated; `GanLoss` supports functional update for combining
//! adversarial and auxiliary losses.

mod cyclegan;
mod stargan;

pub use cyclegan::{CycleGanLoss, CycleGanModel};
pub use stargan::StarGanModel;

use crate::error::{Error, Result};
use ndarray::ArrayD;

/// One training step of a vanilla GAN.
///
/// # Example
///
/// ```
/// use adversario::GanModel;
/// use ndarray::array;
///
/// let model = GanModel::new(
///     array![[0.0_f32, 0.0]].into_dyn(), // generator inputs (noise)
///     array![[0.3_f32, 0.7]].into_dyn(), // generated data
///     array![[1.0_f32, 0.0]].into_dyn(), // real data
///     array![[0.9_f32]].into_dyn(),      // D(real)
///     array![[0.1_f32]].into_dyn(),      // D(generated)
/// );
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GanModel {
    /// Inputs to the generator (typically latent noise).
    pub generator_inputs: ArrayD<f32>,
    /// Generator output for this step.
    pub generated_data: ArrayD<f32>,
    /// Real data batch for this step.
    pub real_data: ArrayD<f32>,
    /// Discriminator outputs on the real data.
    pub discriminator_real_outputs: ArrayD<f32>,
    /// Discriminator outputs on the generated data.
    pub discriminator_gen_outputs: ArrayD<f32>,
}

impl GanModel {
    /// Create a new GAN model tuple.
    pub fn new(
        generator_inputs: ArrayD<f32>,
        generated_data: ArrayD<f32>,
        real_data: ArrayD<f32>,
        discriminator_real_outputs: ArrayD<f32>,
        discriminator_gen_outputs: ArrayD<f32>,
    ) -> Self {
        Self {
            generator_inputs,
            generated_data,
            real_data,
            discriminator_real_outputs,
            discriminator_gen_outputs,
        }
    }

    /// Check internal shape consistency.
    ///
    /// The discriminator must have been evaluated on batches of the same
    /// shape, and generated data must mirror the real data layout.
    pub fn validate(&self) -> Result<()> {
        if self.discriminator_real_outputs.shape() != self.discriminator_gen_outputs.shape() {
            return Err(Error::InvalidModel(format!(
                "discriminator_real_outputs {:?} and discriminator_gen_outputs {:?} differ in shape",
                self.discriminator_real_outputs.shape(),
                self.discriminator_gen_outputs.shape()
            )));
        }
        if self.real_data.shape() != self.generated_data.shape() {
            return Err(Error::InvalidModel(format!(
                "real_data {:?} and generated_data {:?} differ in shape",
                self.real_data.shape(),
                self.generated_data.shape()
            )));
        }
        if self.discriminator_real_outputs.is_empty() {
            return Err(Error::InvalidModel(
                "discriminator outputs are empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generator/discriminator loss pair for one training step.
///
/// Immutable; use [`GanLoss::with_generator_loss`] or
/// [`GanLoss::with_discriminator_loss`] to build a modified copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GanLoss {
    /// Scalar generator loss.
    pub generator_loss: f32,
    /// Scalar discriminator loss.
    pub discriminator_loss: f32,
}

impl GanLoss {
    /// Create a new loss pair.
    pub fn new(generator_loss: f32, discriminator_loss: f32) -> Self {
        Self {
            generator_loss,
            discriminator_loss,
        }
    }

    /// Functional update: same pair with the generator loss replaced.
    #[must_use]
    pub fn with_generator_loss(self, generator_loss: f32) -> Self {
        Self {
            generator_loss,
            ..self
        }
    }

    /// Functional update: same pair with the discriminator loss replaced.
    #[must_use]
    pub fn with_discriminator_loss(self, discriminator_loss: f32) -> Self {
        Self {
            discriminator_loss,
            ..self
        }
    }
}
