//! Alternating GAN training loop
//!
//! GAN training alternates discriminator and generator updates. This module
//! provides the scheduling glue: how many sub-steps each network takes per
//! joint step, loss-history tracking, and a simple driver loop. The actual
//! forward/backward work stays in user closures, so any model representation
//! can plug in.
//!
//! # Example
//!
//! ```
//! use adversario::train::{GanTrainer, GanTrainerConfig};
//!
//! let mut trainer = GanTrainer::new(GanTrainerConfig::default().with_log_interval(1000));
//! let result = trainer.train(5, || 0.7, || 0.5);
//!
//! assert_eq!(result.steps, 5);
//! assert!((trainer.avg_generator_loss() - 0.7).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;

/// Recent-loss history window.
const LOSS_HISTORY: usize = 100;

/// Sub-step counts for one joint training step.
///
/// `discriminator_train_steps > 1` is the usual WGAN-style "n critic"
/// schedule; a count of 0 freezes that network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanTrainSteps {
    /// Generator updates per joint step.
    pub generator_train_steps: usize,
    /// Discriminator updates per joint step.
    pub discriminator_train_steps: usize,
}

impl GanTrainSteps {
    /// Create a new sub-step schedule.
    pub fn new(generator_train_steps: usize, discriminator_train_steps: usize) -> Self {
        Self {
            generator_train_steps,
            discriminator_train_steps,
        }
    }
}

impl Default for GanTrainSteps {
    fn default() -> Self {
        Self {
            generator_train_steps: 1,
            discriminator_train_steps: 1,
        }
    }
}

/// Trainer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanTrainerConfig {
    /// Sub-step schedule.
    pub steps: GanTrainSteps,
    /// Print training progress every N joint steps.
    pub log_interval: usize,
}

impl Default for GanTrainerConfig {
    fn default() -> Self {
        Self {
            steps: GanTrainSteps::default(),
            log_interval: 10,
        }
    }
}

impl GanTrainerConfig {
    /// Create a new trainer configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sub-step schedule.
    pub fn with_steps(mut self, steps: GanTrainSteps) -> Self {
        self.steps = steps;
        self
    }

    /// Set the logging interval. An interval of 0 disables progress output.
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval;
        self
    }
}

/// Losses from one joint training step (averaged over sub-steps).
#[derive(Debug, Clone, Copy)]
pub struct GanStepResult {
    /// Average generator loss, 0.0 if the generator was frozen.
    pub generator_loss: f32,
    /// Average discriminator loss, 0.0 if the discriminator was frozen.
    pub discriminator_loss: f32,
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct GanTrainResult {
    /// Joint steps taken in this run.
    pub steps: usize,
    /// Generator loss of the last step.
    pub final_generator_loss: f32,
    /// Discriminator loss of the last step.
    pub final_discriminator_loss: f32,
    /// Total training time in seconds.
    pub elapsed_secs: f64,
}

/// Drives alternating generator/discriminator updates and tracks recent
/// losses.
///
/// The discriminator runs first within each joint step, as is conventional.
pub struct GanTrainer {
    config: GanTrainerConfig,
    steps_taken: usize,
    gen_losses: VecDeque<f32>,
    disc_losses: VecDeque<f32>,
}

impl GanTrainer {
    /// Create a new trainer.
    pub fn new(config: GanTrainerConfig) -> Self {
        Self {
            config,
            steps_taken: 0,
            gen_losses: VecDeque::with_capacity(LOSS_HISTORY),
            disc_losses: VecDeque::with_capacity(LOSS_HISTORY),
        }
    }

    /// Total joint steps taken.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Perform one joint step: the configured discriminator sub-steps, then
    /// the generator sub-steps. Each closure performs one update and returns
    /// its loss.
    pub fn train_step<G, D>(
        &mut self,
        mut generator_step: G,
        mut discriminator_step: D,
    ) -> GanStepResult
    where
        G: FnMut() -> f32,
        D: FnMut() -> f32,
    {
        let disc_steps = self.config.steps.discriminator_train_steps;
        let mut disc_loss = 0.0;
        for _ in 0..disc_steps {
            disc_loss += discriminator_step();
        }
        if disc_steps > 0 {
            disc_loss /= disc_steps as f32;
            Self::record(&mut self.disc_losses, disc_loss);
        }

        let gen_steps = self.config.steps.generator_train_steps;
        let mut gen_loss = 0.0;
        for _ in 0..gen_steps {
            gen_loss += generator_step();
        }
        if gen_steps > 0 {
            gen_loss /= gen_steps as f32;
            Self::record(&mut self.gen_losses, gen_loss);
        }

        self.steps_taken += 1;
        GanStepResult {
            generator_loss: gen_loss,
            discriminator_loss: disc_loss,
        }
    }

    /// Run `num_steps` joint steps, logging progress every `log_interval`
    /// steps.
    pub fn train<G, D>(
        &mut self,
        num_steps: usize,
        mut generator_step: G,
        mut discriminator_step: D,
    ) -> GanTrainResult
    where
        G: FnMut() -> f32,
        D: FnMut() -> f32,
    {
        let start = Instant::now();
        let mut last = GanStepResult {
            generator_loss: 0.0,
            discriminator_loss: 0.0,
        };

        for step in 0..num_steps {
            last = self.train_step(&mut generator_step, &mut discriminator_step);

            if self.config.log_interval > 0 && (step + 1) % self.config.log_interval == 0 {
                println!(
                    "Step {}: gen_loss={:.4}, disc_loss={:.4}",
                    self.steps_taken, last.generator_loss, last.discriminator_loss
                );
            }
        }

        GanTrainResult {
            steps: num_steps,
            final_generator_loss: last.generator_loss,
            final_discriminator_loss: last.discriminator_loss,
            elapsed_secs: start.elapsed().as_secs_f64(),
        }
    }

    fn record(history: &mut VecDeque<f32>, loss: f32) {
        if history.len() >= LOSS_HISTORY {
            history.pop_front();
        }
        history.push_back(loss);
    }

    /// Average generator loss over recent history.
    pub fn avg_generator_loss(&self) -> f32 {
        Self::avg(&self.gen_losses)
    }

    /// Average discriminator loss over recent history.
    pub fn avg_discriminator_loss(&self) -> f32 {
        Self::avg(&self.disc_losses)
    }

    fn avg(history: &VecDeque<f32>) -> f32 {
        if history.is_empty() {
            return 0.0;
        }
        history.iter().sum::<f32>() / history.len() as f32
    }
}
