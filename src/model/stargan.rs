//! StarGAN model tuple

use crate::error::{Error, Result};
use ndarray::ArrayD;

/// One training step of a StarGAN: multi-domain image translation with a
/// single generator conditioned on a target-domain label.
///
/// The discriminator here predicts whether an image is real ("source
/// prediction"); the domain labels are one-hot over the domain set.
#[derive(Debug, Clone)]
pub struct StarGanModel {
    /// Real input data.
    pub input_data: ArrayD<f32>,
    /// One-hot domain labels of the input data.
    pub input_data_domain_label: ArrayD<f32>,
    /// Generator output for the target domains.
    pub generated_data: ArrayD<f32>,
    /// One-hot target-domain labels used to condition the generator.
    pub generated_data_domain_target: ArrayD<f32>,
    /// Discriminator source predictions on the input data.
    pub discriminator_input_source_predictions: ArrayD<f32>,
    /// Discriminator source predictions on the generated data.
    pub discriminator_generated_source_predictions: ArrayD<f32>,
}

impl StarGanModel {
    /// Create a new StarGAN model tuple.
    pub fn new(
        input_data: ArrayD<f32>,
        input_data_domain_label: ArrayD<f32>,
        generated_data: ArrayD<f32>,
        generated_data_domain_target: ArrayD<f32>,
        discriminator_input_source_predictions: ArrayD<f32>,
        discriminator_generated_source_predictions: ArrayD<f32>,
    ) -> Self {
        Self {
            input_data,
            input_data_domain_label,
            generated_data,
            generated_data_domain_target,
            discriminator_input_source_predictions,
            discriminator_generated_source_predictions,
        }
    }

    /// Number of domains, taken from the last axis of the domain labels.
    pub fn num_domains(&self) -> usize {
        self.input_data_domain_label
            .shape()
            .last()
            .copied()
            .unwrap_or(0)
    }

    /// Check internal shape consistency.
    pub fn validate(&self) -> Result<()> {
        if self.input_data_domain_label.shape() != self.generated_data_domain_target.shape() {
            return Err(Error::InvalidModel(format!(
                "input_data_domain_label {:?} and generated_data_domain_target {:?} differ in shape",
                self.input_data_domain_label.shape(),
                self.generated_data_domain_target.shape()
            )));
        }
        if self.discriminator_input_source_predictions.shape()
            != self.discriminator_generated_source_predictions.shape()
        {
            return Err(Error::InvalidModel(format!(
                "discriminator source predictions differ in shape: input {:?}, generated {:?}",
                self.discriminator_input_source_predictions.shape(),
                self.discriminator_generated_source_predictions.shape()
            )));
        }
        if self.input_data.shape() != self.generated_data.shape() {
            return Err(Error::InvalidModel(format!(
                "input_data {:?} and generated_data {:?} differ in shape",
                self.input_data.shape(),
                self.generated_data.shape()
            )));
        }
        Ok(())
    }
}
