//! Model-tuple loss adapters
//!
//! The losses in this module mirror those in [`super::wargs`]. Losses there
//! take individual discriminator-output arguments; here they take a
//! [`GanModel`] and resolve those arguments from its fields. For example:
//!
//! ```
//! use adversario::loss::{tuple, wargs};
//! use adversario::GanModel;
//! use ndarray::array;
//!
//! let noise = array![[0.0_f32]].into_dyn();
//! let model = GanModel::new(
//!     noise.clone(),
//!     noise.clone(),
//!     noise,
//!     array![[0.9_f32]].into_dyn(),
//!     array![[0.1_f32]].into_dyn(),
//! );
//!
//! // `wargs` losses take individual arguments.
//! let opts = wargs::GeneratorLossOptions::default();
//! let w = wargs::wasserstein_generator_loss(&model.discriminator_gen_outputs, &opts).unwrap();
//!
//! // `tuple` losses take a GanModel.
//! let w2 = tuple::wasserstein_generator_loss(&model, &opts).unwrap();
//! assert_eq!(w, w2);
//! ```
//!
//! Each adapter validates the model first, so malformed tuples fail with a
//! descriptive error rather than producing a silently wrong scalar. Defaulted
//! parameters live in the options structs; required ones come from the model
//! fields, so the two can never collide.

use super::wargs;
use super::wargs::{DiscriminatorLossOptions, GeneratorLossOptions, MinimaxLossOptions};
use crate::error::Result;
use crate::model::{CycleGanModel, GanLoss, GanModel, StarGanModel};
use ndarray::ArrayD;

/// The `GanModel` version of [`wargs::wasserstein_generator_loss`].
pub fn wasserstein_generator_loss(model: &GanModel, opts: &GeneratorLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::wasserstein_generator_loss(&model.discriminator_gen_outputs, opts)
}

/// The `GanModel` version of [`wargs::wasserstein_discriminator_loss`].
pub fn wasserstein_discriminator_loss(
    model: &GanModel,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    model.validate()?;
    wargs::wasserstein_discriminator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// The `GanModel` version of [`wargs::hinge_generator_loss`].
pub fn hinge_generator_loss(model: &GanModel, opts: &GeneratorLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::hinge_generator_loss(&model.discriminator_gen_outputs, opts)
}

/// The `GanModel` version of [`wargs::hinge_discriminator_loss`].
pub fn hinge_discriminator_loss(model: &GanModel, opts: &DiscriminatorLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::hinge_discriminator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// The `GanModel` version of [`wargs::minimax_generator_loss`].
pub fn minimax_generator_loss(model: &GanModel, opts: &GeneratorLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::minimax_generator_loss(&model.discriminator_gen_outputs, opts)
}

/// The `GanModel` version of [`wargs::minimax_discriminator_loss`].
pub fn minimax_discriminator_loss(model: &GanModel, opts: &MinimaxLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::minimax_discriminator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// The `GanModel` version of [`wargs::modified_generator_loss`].
pub fn modified_generator_loss(model: &GanModel, opts: &GeneratorLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::modified_generator_loss(&model.discriminator_gen_outputs, opts)
}

/// The `GanModel` version of [`wargs::modified_discriminator_loss`].
pub fn modified_discriminator_loss(model: &GanModel, opts: &MinimaxLossOptions) -> Result<f32> {
    model.validate()?;
    wargs::modified_discriminator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// The `GanModel` version of [`wargs::least_squares_generator_loss`].
pub fn least_squares_generator_loss(
    model: &GanModel,
    opts: &GeneratorLossOptions,
) -> Result<f32> {
    model.validate()?;
    wargs::least_squares_generator_loss(&model.discriminator_gen_outputs, opts)
}

/// The `GanModel` version of [`wargs::least_squares_discriminator_loss`].
pub fn least_squares_discriminator_loss(
    model: &GanModel,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    model.validate()?;
    wargs::least_squares_discriminator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// The `GanModel` version of [`wargs::relativistic_generator_loss`].
pub fn relativistic_generator_loss(
    model: &GanModel,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    model.validate()?;
    wargs::relativistic_generator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// The `GanModel` version of [`wargs::relativistic_discriminator_loss`].
pub fn relativistic_discriminator_loss(
    model: &GanModel,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    model.validate()?;
    wargs::relativistic_discriminator_loss(
        &model.discriminator_real_outputs,
        &model.discriminator_gen_outputs,
        opts,
    )
}

/// Evaluate a generator/discriminator loss pair for one model tuple.
///
/// # Example
///
/// ```
/// use adversario::loss::tuple;
/// use adversario::loss::wargs::{DiscriminatorLossOptions, GeneratorLossOptions};
/// use adversario::GanModel;
/// use ndarray::array;
///
/// let noise = array![[0.0_f32]].into_dyn();
/// let model = GanModel::new(
///     noise.clone(),
///     noise.clone(),
///     noise,
///     array![[0.9_f32]].into_dyn(),
///     array![[0.1_f32]].into_dyn(),
/// );
///
/// let gen_opts = GeneratorLossOptions::default();
/// let disc_opts = DiscriminatorLossOptions::default();
/// let losses = tuple::gan_loss(
///     &model,
///     |m| tuple::wasserstein_generator_loss(m, &gen_opts),
///     |m| tuple::wasserstein_discriminator_loss(m, &disc_opts),
/// )
/// .unwrap();
/// assert!(losses.generator_loss.is_finite());
/// ```
pub fn gan_loss<G, D>(model: &GanModel, generator_loss_fn: G, discriminator_loss_fn: D) -> Result<GanLoss>
where
    G: FnOnce(&GanModel) -> Result<f32>,
    D: FnOnce(&GanModel) -> Result<f32>,
{
    model.validate()?;
    Ok(GanLoss::new(
        generator_loss_fn(model)?,
        discriminator_loss_fn(model)?,
    ))
}

/// Combine an adversarial loss pair with a main (non-adversarial) loss.
///
/// Treats `gan_loss.generator_loss` as the adversarial term and returns a new
/// pair with the generator loss replaced by
/// `main_loss + weight_factor * adversarial_loss`. The discriminator loss is
/// untouched.
pub fn combine_adversarial_loss(
    gan_loss: GanLoss,
    main_loss: f32,
    weight_factor: f32,
) -> Result<GanLoss> {
    let combined =
        wargs::combine_adversarial_loss(main_loss, gan_loss.generator_loss, weight_factor)?;
    Ok(gan_loss.with_generator_loss(combined))
}

/// The `CycleGanModel` version of [`wargs::cycle_consistency_loss`].
pub fn cycle_consistency_loss(model: &CycleGanModel) -> Result<f32> {
    model.validate()?;
    wargs::cycle_consistency_loss(
        &model.model_x2y.generator_inputs,
        &model.reconstructed_x,
        &model.model_y2x.generator_inputs,
        &model.reconstructed_y,
    )
}

/// Apply a generator loss to a `StarGanModel`.
///
/// The loss sees the discriminator's source predictions on the generated
/// data, matching the generator's objective of making translations look real.
pub fn stargan_generator_loss<F>(model: &StarGanModel, loss_fn: F) -> Result<f32>
where
    F: FnOnce(&ArrayD<f32>) -> Result<f32>,
{
    model.validate()?;
    loss_fn(&model.discriminator_generated_source_predictions)
}

/// Apply a discriminator loss to a `StarGanModel`.
///
/// The loss sees the discriminator's source predictions on the real input
/// data and on the generated data, in that order.
pub fn stargan_discriminator_loss<F>(model: &StarGanModel, loss_fn: F) -> Result<f32>
where
    F: FnOnce(&ArrayD<f32>, &ArrayD<f32>) -> Result<f32>,
{
    model.validate()?;
    loss_fn(
        &model.discriminator_input_source_predictions,
        &model.discriminator_generated_source_predictions,
    )
}
