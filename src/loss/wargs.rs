//! Per-argument adversarial losses
//!
//! Each loss takes the discriminator's output arrays directly. Discriminator
//! outputs are logits unless noted otherwise. Empty inputs are rejected with
//! an error naming the loss and argument, since reducing an empty array would
//! silently produce NaN.

use crate::error::{Error, Result};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

/// How to reduce an elementwise loss to a scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reduction {
    /// Mean over all elements (default).
    #[default]
    Mean,
    /// Sum over all elements.
    Sum,
}

impl Reduction {
    fn apply(self, values: &ArrayD<f32>, weight: f32) -> f32 {
        let sum = values.sum() * weight;
        match self {
            Reduction::Sum => sum,
            Reduction::Mean => sum / values.len() as f32,
        }
    }
}

/// Options shared by generator losses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeneratorLossOptions {
    /// Scalar weight applied to the loss.
    pub weights: f32,
    /// Reduction to a scalar.
    pub reduction: Reduction,
}

impl Default for GeneratorLossOptions {
    fn default() -> Self {
        Self {
            weights: 1.0,
            reduction: Reduction::Mean,
        }
    }
}

/// Options shared by discriminator losses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscriminatorLossOptions {
    /// Scalar weight applied to the real-data term.
    pub real_weights: f32,
    /// Scalar weight applied to the generated-data term.
    pub generated_weights: f32,
    /// Reduction to a scalar.
    pub reduction: Reduction,
}

impl Default for DiscriminatorLossOptions {
    fn default() -> Self {
        Self {
            real_weights: 1.0,
            generated_weights: 1.0,
            reduction: Reduction::Mean,
        }
    }
}

/// Options for the minimax/modified discriminator losses, which smooth the
/// real-data labels to regularize the discriminator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MinimaxLossOptions {
    /// Real labels become `1 - label_smoothing`.
    pub label_smoothing: f32,
    /// Scalar weight applied to the real-data term.
    pub real_weights: f32,
    /// Scalar weight applied to the generated-data term.
    pub generated_weights: f32,
    /// Reduction to a scalar.
    pub reduction: Reduction,
}

impl Default for MinimaxLossOptions {
    fn default() -> Self {
        Self {
            label_smoothing: 0.25,
            real_weights: 1.0,
            generated_weights: 1.0,
            reduction: Reduction::Mean,
        }
    }
}

fn check_nonempty(loss: &'static str, name: &str, values: &ArrayD<f32>) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidLossInput {
            loss,
            reason: format!("`{name}` is empty"),
        });
    }
    Ok(())
}

/// Numerically stable sigmoid cross-entropy against a constant label:
/// `max(x, 0) - x * label + ln(1 + e^{-|x|})`.
fn sigmoid_cross_entropy(logits: &ArrayD<f32>, label: f32) -> ArrayD<f32> {
    logits.mapv(|x| x.max(0.0) - x * label + (-x.abs()).exp().ln_1p())
}

/// Wasserstein generator loss: `-E[D(G(z))]`.
///
/// From "Wasserstein GAN" (<https://arxiv.org/abs/1701.07875>).
pub fn wasserstein_generator_loss(
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &GeneratorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "wasserstein_generator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    Ok(-opts.reduction.apply(discriminator_gen_outputs, opts.weights))
}

/// Wasserstein discriminator loss: `E[D(G(z))] - E[D(x)]`.
pub fn wasserstein_discriminator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "wasserstein_discriminator",
        "discriminator_real_outputs",
        discriminator_real_outputs,
    )?;
    check_nonempty(
        "wasserstein_discriminator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let loss_on_generated = opts
        .reduction
        .apply(discriminator_gen_outputs, opts.generated_weights);
    let loss_on_real = opts
        .reduction
        .apply(discriminator_real_outputs, opts.real_weights);
    Ok(loss_on_generated - loss_on_real)
}

/// Hinge generator loss: `-E[D(G(z))]` (same form as Wasserstein).
///
/// From "Geometric GAN" (<https://arxiv.org/abs/1705.02894>).
pub fn hinge_generator_loss(
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &GeneratorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "hinge_generator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    Ok(-opts.reduction.apply(discriminator_gen_outputs, opts.weights))
}

/// Hinge discriminator loss: `E[relu(1 - D(x))] + E[relu(1 + D(G(z)))]`.
pub fn hinge_discriminator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "hinge_discriminator",
        "discriminator_real_outputs",
        discriminator_real_outputs,
    )?;
    check_nonempty(
        "hinge_discriminator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let real_hinge = discriminator_real_outputs.mapv(|x| (1.0 - x).max(0.0));
    let gen_hinge = discriminator_gen_outputs.mapv(|x| (1.0 + x).max(0.0));
    Ok(opts.reduction.apply(&real_hinge, opts.real_weights)
        + opts.reduction.apply(&gen_hinge, opts.generated_weights))
}

/// Original minimax discriminator loss:
/// `E[xent(D(x), 1 - smoothing)] + E[xent(D(G(z)), 0)]`.
///
/// From "Generative Adversarial Nets" (<https://arxiv.org/abs/1406.2661>).
pub fn minimax_discriminator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &MinimaxLossOptions,
) -> Result<f32> {
    check_nonempty(
        "minimax_discriminator",
        "discriminator_real_outputs",
        discriminator_real_outputs,
    )?;
    check_nonempty(
        "minimax_discriminator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    if !(0.0..=1.0).contains(&opts.label_smoothing) {
        return Err(Error::InvalidParameter(format!(
            "label_smoothing must be in [0, 1], got {}",
            opts.label_smoothing
        )));
    }
    let loss_on_real =
        sigmoid_cross_entropy(discriminator_real_outputs, 1.0 - opts.label_smoothing);
    let loss_on_generated = sigmoid_cross_entropy(discriminator_gen_outputs, 0.0);
    Ok(opts.reduction.apply(&loss_on_real, opts.real_weights)
        + opts
            .reduction
            .apply(&loss_on_generated, opts.generated_weights))
}

/// Original minimax generator loss: `E[log(1 - D(G(z)))]`, the saturating
/// form. Prefer [`modified_generator_loss`] in practice.
pub fn minimax_generator_loss(
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &GeneratorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "minimax_generator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    // xent(x, 0) = -log(1 - sigmoid(x)), so negating recovers log(1 - D).
    let xent = sigmoid_cross_entropy(discriminator_gen_outputs, 0.0);
    Ok(-opts.reduction.apply(&xent, opts.weights))
}

/// Non-saturating ("modified") generator loss: `E[xent(D(G(z)), 1)]`,
/// i.e. `-E[log D(G(z))]`.
pub fn modified_generator_loss(
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &GeneratorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "modified_generator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let xent = sigmoid_cross_entropy(discriminator_gen_outputs, 1.0);
    Ok(opts.reduction.apply(&xent, opts.weights))
}

/// Modified discriminator loss; identical to the minimax form.
pub fn modified_discriminator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &MinimaxLossOptions,
) -> Result<f32> {
    minimax_discriminator_loss(
        discriminator_real_outputs,
        discriminator_gen_outputs,
        opts,
    )
}

/// Least-squares generator loss: `E[(D(G(z)) - 1)^2]`.
///
/// From "Least Squares Generative Adversarial Networks"
/// (<https://arxiv.org/abs/1611.04076>). Discriminator outputs are raw
/// regression values here, not logits.
pub fn least_squares_generator_loss(
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &GeneratorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "least_squares_generator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let sq = discriminator_gen_outputs.mapv(|x| (x - 1.0) * (x - 1.0));
    Ok(opts.reduction.apply(&sq, opts.weights))
}

/// Least-squares discriminator loss:
/// `(E[(D(x) - 1)^2] + E[D(G(z))^2]) / 2`.
pub fn least_squares_discriminator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "least_squares_discriminator",
        "discriminator_real_outputs",
        discriminator_real_outputs,
    )?;
    check_nonempty(
        "least_squares_discriminator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let real_sq = discriminator_real_outputs.mapv(|x| (x - 1.0) * (x - 1.0));
    let gen_sq = discriminator_gen_outputs.mapv(|x| x * x);
    Ok((opts.reduction.apply(&real_sq, opts.real_weights)
        + opts.reduction.apply(&gen_sq, opts.generated_weights))
        / 2.0)
}

/// Relativistic average generator loss.
///
/// From "The relativistic discriminator: a key element missing from standard
/// GAN" (<https://arxiv.org/abs/1807.00734>). Uses the difference between
/// each logit and the mean logit of the opposite population.
pub fn relativistic_generator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "relativistic_generator",
        "discriminator_real_outputs",
        discriminator_real_outputs,
    )?;
    check_nonempty(
        "relativistic_generator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let (real_diff, gen_diff) =
        relativistic_logit_diffs(discriminator_real_outputs, discriminator_gen_outputs);
    let real_xent = sigmoid_cross_entropy(&real_diff, 0.0);
    let gen_xent = sigmoid_cross_entropy(&gen_diff, 1.0);
    Ok(opts.reduction.apply(&real_xent, opts.real_weights)
        + opts.reduction.apply(&gen_xent, opts.generated_weights))
}

/// Relativistic average discriminator loss.
pub fn relativistic_discriminator_loss(
    discriminator_real_outputs: &ArrayD<f32>,
    discriminator_gen_outputs: &ArrayD<f32>,
    opts: &DiscriminatorLossOptions,
) -> Result<f32> {
    check_nonempty(
        "relativistic_discriminator",
        "discriminator_real_outputs",
        discriminator_real_outputs,
    )?;
    check_nonempty(
        "relativistic_discriminator",
        "discriminator_gen_outputs",
        discriminator_gen_outputs,
    )?;
    let (real_diff, gen_diff) =
        relativistic_logit_diffs(discriminator_real_outputs, discriminator_gen_outputs);
    let real_xent = sigmoid_cross_entropy(&real_diff, 1.0);
    let gen_xent = sigmoid_cross_entropy(&gen_diff, 0.0);
    Ok(opts.reduction.apply(&real_xent, opts.real_weights)
        + opts.reduction.apply(&gen_xent, opts.generated_weights))
}

fn relativistic_logit_diffs(
    real: &ArrayD<f32>,
    gen: &ArrayD<f32>,
) -> (ArrayD<f32>, ArrayD<f32>) {
    let mean_gen = gen.sum() / gen.len() as f32;
    let mean_real = real.sum() / real.len() as f32;
    (real.mapv(|x| x - mean_gen), gen.mapv(|x| x - mean_real))
}

/// Cycle-consistency loss: mean absolute error of both reconstructions.
///
/// From "Unpaired Image-to-Image Translation using Cycle-Consistent
/// Adversarial Networks" (<https://arxiv.org/abs/1703.10593>).
pub fn cycle_consistency_loss(
    data_x: &ArrayD<f32>,
    reconstructed_data_x: &ArrayD<f32>,
    data_y: &ArrayD<f32>,
    reconstructed_data_y: &ArrayD<f32>,
) -> Result<f32> {
    check_nonempty("cycle_consistency", "data_x", data_x)?;
    check_nonempty("cycle_consistency", "data_y", data_y)?;
    if data_x.shape() != reconstructed_data_x.shape() {
        return Err(Error::ShapeMismatch {
            expected: data_x.shape().to_vec(),
            got: reconstructed_data_x.shape().to_vec(),
        });
    }
    if data_y.shape() != reconstructed_data_y.shape() {
        return Err(Error::ShapeMismatch {
            expected: data_y.shape().to_vec(),
            got: reconstructed_data_y.shape().to_vec(),
        });
    }
    let loss_x = (data_x - reconstructed_data_x).mapv(f32::abs).mean().unwrap_or(0.0);
    let loss_y = (data_y - reconstructed_data_y).mapv(f32::abs).mean().unwrap_or(0.0);
    Ok(loss_x + loss_y)
}

/// Combine an adversarial loss with a main (non-adversarial) loss:
/// `main_loss + weight_factor * adversarial_loss`.
pub fn combine_adversarial_loss(
    main_loss: f32,
    adversarial_loss: f32,
    weight_factor: f32,
) -> Result<f32> {
    if !weight_factor.is_finite() || weight_factor < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "weight_factor must be finite and non-negative, got {weight_factor}"
        )));
    }
    Ok(main_loss + weight_factor * adversarial_loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use proptest::prelude::*;

    fn arr(values: &[f32]) -> ArrayD<f32> {
        ArrayD::from_shape_vec(ndarray::IxDyn(&[values.len()]), values.to_vec()).unwrap()
    }

    #[test]
    fn test_wasserstein_generator_loss() {
        let d_gen = arr(&[1.0, 3.0]);
        let opts = GeneratorLossOptions::default();
        let loss = wasserstein_generator_loss(&d_gen, &opts).unwrap();
        assert_relative_eq!(loss, -2.0);
    }

    #[test]
    fn test_wasserstein_discriminator_loss() {
        let d_real = arr(&[2.0, 4.0]);
        let d_gen = arr(&[1.0, 1.0]);
        let opts = DiscriminatorLossOptions::default();
        let loss = wasserstein_discriminator_loss(&d_real, &d_gen, &opts).unwrap();
        // mean(gen) - mean(real) = 1 - 3
        assert_relative_eq!(loss, -2.0);
    }

    #[test]
    fn test_wasserstein_sum_reduction() {
        let d_gen = arr(&[1.0, 3.0]);
        let opts = GeneratorLossOptions {
            reduction: Reduction::Sum,
            ..Default::default()
        };
        let loss = wasserstein_generator_loss(&d_gen, &opts).unwrap();
        assert_relative_eq!(loss, -4.0);
    }

    #[test]
    fn test_weights_scale_linearly() {
        let d_gen = arr(&[1.0, 3.0]);
        let unweighted = wasserstein_generator_loss(&d_gen, &GeneratorLossOptions::default());
        let weighted = wasserstein_generator_loss(
            &d_gen,
            &GeneratorLossOptions {
                weights: 2.3,
                ..Default::default()
            },
        );
        assert_relative_eq!(weighted.unwrap(), unweighted.unwrap() * 2.3, epsilon = 1e-6);
    }

    #[test]
    fn test_hinge_discriminator_loss() {
        // relu(1 - [0.5, 2.0]) = [0.5, 0.0]; relu(1 + [-2.0, 0.5]) = [0.0, 1.5]
        let d_real = arr(&[0.5, 2.0]);
        let d_gen = arr(&[-2.0, 0.5]);
        let opts = DiscriminatorLossOptions::default();
        let loss = hinge_discriminator_loss(&d_real, &d_gen, &opts).unwrap();
        assert_relative_eq!(loss, 0.25 + 0.75);
    }

    #[test]
    fn test_minimax_discriminator_loss_no_smoothing() {
        let d_real = arr(&[0.0]);
        let d_gen = arr(&[0.0]);
        let opts = MinimaxLossOptions {
            label_smoothing: 0.0,
            ..Default::default()
        };
        // xent(0, 1) = ln 2, xent(0, 0) = ln 2
        let loss = minimax_discriminator_loss(&d_real, &d_gen, &opts).unwrap();
        assert_relative_eq!(loss, 2.0 * std::f32::consts::LN_2, epsilon = 1e-6);
    }

    #[test]
    fn test_minimax_rejects_bad_smoothing() {
        let d = arr(&[0.0]);
        let opts = MinimaxLossOptions {
            label_smoothing: 1.5,
            ..Default::default()
        };
        assert!(minimax_discriminator_loss(&d, &d, &opts).is_err());
    }

    #[test]
    fn test_modified_generator_loss_decreases_with_confidence() {
        // Higher logit for a generated sample means the discriminator is more
        // fooled, so the non-saturating generator loss must be lower.
        let opts = GeneratorLossOptions::default();
        let low = modified_generator_loss(&arr(&[-2.0]), &opts).unwrap();
        let high = modified_generator_loss(&arr(&[2.0]), &opts).unwrap();
        assert!(high < low);
    }

    #[test]
    fn test_minimax_generator_is_negative_of_xent_zero() {
        let d_gen = arr(&[0.7, -0.3]);
        let opts = GeneratorLossOptions::default();
        let loss = minimax_generator_loss(&d_gen, &opts).unwrap();
        assert!(loss < 0.0);
    }

    #[test]
    fn test_least_squares_losses() {
        let d_real = arr(&[1.0, 1.0]);
        let d_gen = arr(&[0.0, 0.0]);
        let opts = DiscriminatorLossOptions::default();
        // Perfect discriminator: both terms zero
        let loss = least_squares_discriminator_loss(&d_real, &d_gen, &opts).unwrap();
        assert_relative_eq!(loss, 0.0);

        // Generator fully fooling: (1 - 1)^2 = 0
        let gen_opts = GeneratorLossOptions::default();
        let gen_loss = least_squares_generator_loss(&arr(&[1.0, 1.0]), &gen_opts).unwrap();
        assert_relative_eq!(gen_loss, 0.0);
    }

    #[test]
    fn test_relativistic_losses_symmetric_at_equal_outputs() {
        // When D scores real and generated identically, the logit diffs are
        // all zero and both losses reduce to 2 * ln 2.
        let d = arr(&[0.5, 0.5]);
        let opts = DiscriminatorLossOptions::default();
        let gen = relativistic_generator_loss(&d, &d, &opts).unwrap();
        let disc = relativistic_discriminator_loss(&d, &d, &opts).unwrap();
        assert_relative_eq!(gen, 2.0 * std::f32::consts::LN_2, epsilon = 1e-6);
        assert_relative_eq!(disc, gen, epsilon = 1e-6);
    }

    #[test]
    fn test_cycle_consistency_loss() {
        let x = arr(&[1.0, 2.0]);
        let rx = arr(&[1.5, 2.5]);
        let y = arr(&[0.0]);
        let ry = arr(&[1.0]);
        let loss = cycle_consistency_loss(&x, &rx, &y, &ry).unwrap();
        assert_relative_eq!(loss, 0.5 + 1.0);
    }

    #[test]
    fn test_cycle_consistency_shape_mismatch() {
        let x = arr(&[1.0, 2.0]);
        let rx = arr(&[1.5]);
        let y = arr(&[0.0]);
        let err = cycle_consistency_loss(&x, &rx, &y, &y).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_combine_adversarial_loss() {
        let combined = combine_adversarial_loss(1.0, 2.0, 0.5).unwrap();
        assert_relative_eq!(combined, 2.0);

        assert!(combine_adversarial_loss(1.0, 2.0, -1.0).is_err());
        assert!(combine_adversarial_loss(1.0, 2.0, f32::NAN).is_err());
    }

    #[test]
    fn test_empty_input_rejected_with_argument_name() {
        let empty = ArrayD::<f32>::zeros(ndarray::IxDyn(&[0]));
        let err =
            wasserstein_generator_loss(&empty, &GeneratorLossOptions::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("wasserstein_generator"));
        assert!(msg.contains("discriminator_gen_outputs"));
    }

    proptest! {
        #[test]
        fn test_sigmoid_xent_non_negative(
            logits in prop::collection::vec(-20.0f32..20.0, 1..32),
            label in 0.0f32..=1.0,
        ) {
            let xent = sigmoid_cross_entropy(&arr(&logits), label);
            prop_assert!(xent.iter().all(|&v| v >= 0.0 && v.is_finite()));
        }

        #[test]
        fn test_hinge_discriminator_non_negative(
            real in prop::collection::vec(-10.0f32..10.0, 1..16),
            gen in prop::collection::vec(-10.0f32..10.0, 1..16),
        ) {
            let loss = hinge_discriminator_loss(
                &arr(&real),
                &arr(&gen),
                &DiscriminatorLossOptions::default(),
            ).unwrap();
            prop_assert!(loss >= 0.0);
        }

        #[test]
        fn test_minimax_discriminator_finite(
            real in prop::collection::vec(-30.0f32..30.0, 1..16),
            gen in prop::collection::vec(-30.0f32..30.0, 1..16),
        ) {
            let loss = minimax_discriminator_loss(
                &arr(&real),
                &arr(&gen),
                &MinimaxLossOptions::default(),
            ).unwrap();
            prop_assert!(loss.is_finite());
            prop_assert!(loss >= 0.0);
        }
    }
}
