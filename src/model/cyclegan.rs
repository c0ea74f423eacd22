//! CycleGAN model tuple

use super::{GanLoss, GanModel};
use crate::error::{Error, Result};
use ndarray::ArrayD;

/// One training step of a CycleGAN: two coupled GANs plus the reconstructions
/// used for the cycle-consistency loss.
#[derive(Debug, Clone)]
pub struct CycleGanModel {
    /// The X -> Y direction.
    pub model_x2y: GanModel,
    /// The Y -> X direction.
    pub model_y2x: GanModel,
    /// X data passed through both generators: G_y2x(G_x2y(x)).
    pub reconstructed_x: ArrayD<f32>,
    /// Y data passed through both generators: G_x2y(G_y2x(y)).
    pub reconstructed_y: ArrayD<f32>,
}

impl CycleGanModel {
    /// Create a new CycleGAN model tuple.
    pub fn new(
        model_x2y: GanModel,
        model_y2x: GanModel,
        reconstructed_x: ArrayD<f32>,
        reconstructed_y: ArrayD<f32>,
    ) -> Self {
        Self {
            model_x2y,
            model_y2x,
            reconstructed_x,
            reconstructed_y,
        }
    }

    /// Check internal shape consistency, including both sub-models.
    ///
    /// Each reconstruction must have the shape of the generator inputs it
    /// round-tripped.
    pub fn validate(&self) -> Result<()> {
        self.model_x2y.validate()?;
        self.model_y2x.validate()?;

        if self.reconstructed_x.shape() != self.model_x2y.generator_inputs.shape() {
            return Err(Error::InvalidModel(format!(
                "reconstructed_x {:?} does not match model_x2y.generator_inputs {:?}",
                self.reconstructed_x.shape(),
                self.model_x2y.generator_inputs.shape()
            )));
        }
        if self.reconstructed_y.shape() != self.model_y2x.generator_inputs.shape() {
            return Err(Error::InvalidModel(format!(
                "reconstructed_y {:?} does not match model_y2x.generator_inputs {:?}",
                self.reconstructed_y.shape(),
                self.model_y2x.generator_inputs.shape()
            )));
        }
        Ok(())
    }
}

/// Loss pairs for both directions of a CycleGAN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleGanLoss {
    /// Losses for the X -> Y direction.
    pub loss_x2y: GanLoss,
    /// Losses for the Y -> X direction.
    pub loss_y2x: GanLoss,
}

impl CycleGanLoss {
    /// Create a new CycleGAN loss pair.
    pub fn new(loss_x2y: GanLoss, loss_y2x: GanLoss) -> Self {
        Self { loss_x2y, loss_y2x }
    }
}
