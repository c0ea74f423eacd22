//! Training stabilizers
//!
//! Utilities that sit between a model's outputs and its losses to stabilize
//! adversarial training. Currently this is the randomized [`TensorPool`].

mod pool;

pub use pool::TensorPool;
