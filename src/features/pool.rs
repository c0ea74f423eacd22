//! Randomized tensor pool
//!
//! Training a discriminator on only the freshest generator output lets the
//! two networks chase each other batch to batch. The pool keeps a bounded
//! history of recent values and sometimes answers a query with an older value
//! instead of the new one, decorrelating consecutive discriminator batches
//! (the history buffer from "Unpaired Image-to-Image Translation using
//! Cycle-Consistent Adversarial Networks", <https://arxiv.org/abs/1703.10593>).

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_POOLING_PROBABILITY: f64 = 0.5;

/// Fixed-capacity, randomized-replacement cache over a stream of values.
///
/// Below capacity, every queried value is stored and passed straight through.
/// Once full, each query either passes through untouched, or (with the
/// pooling probability) swaps the new value into a uniformly random slot and
/// returns the evicted one. Over a long run each stored value is emitted at
/// most twice: once on entry, once on eviction.
///
/// # Example
///
/// ```
/// use adversario::TensorPool;
///
/// let mut pool: TensorPool<i32> = TensorPool::with_seed(10, 0.5, 42).unwrap();
/// for i in 0..50 {
///     let out = pool.query(i).unwrap();
///     // Outputs never run ahead of the input stream
///     assert!(out <= i);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TensorPool<T> {
    capacity: usize,
    pooling_probability: f64,
    pool: Vec<Vec<T>>,
    group_size: Option<usize>,
    rng: StdRng,
}

impl<T: Clone> TensorPool<T> {
    /// Create a pool with the default pooling probability of 0.5.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pooling_probability: DEFAULT_POOLING_PROBABILITY,
            pool: Vec::with_capacity(capacity),
            group_size: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a pool with an explicit pooling probability.
    ///
    /// `pooling_probability` is the chance that a query against a full pool
    /// is answered with a stored value instead of the input.
    pub fn with_probability(capacity: usize, pooling_probability: f64) -> Result<Self> {
        Self::check_probability(pooling_probability)?;
        Ok(Self {
            pooling_probability,
            ..Self::new(capacity)
        })
    }

    /// Create a pool with a seed for reproducibility.
    pub fn with_seed(capacity: usize, pooling_probability: f64, seed: u64) -> Result<Self> {
        Self::check_probability(pooling_probability)?;
        Ok(Self {
            pooling_probability,
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(capacity)
        })
    }

    fn check_probability(p: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "pooling_probability must be in [0, 1], got {p}"
            )));
        }
        Ok(())
    }

    /// Offer a value to the pool and get back the value to train on.
    ///
    /// A pool with capacity 0 is a passthrough.
    pub fn query(&mut self, value: T) -> Result<T> {
        let mut out = self.query_group(vec![value])?;
        Ok(out.swap_remove(0))
    }

    /// Offer a correlated group of values (e.g. an image and its label) under
    /// a single random decision, preserving order and arity.
    ///
    /// The group size is fixed by the first call; later calls with a
    /// different arity are rejected so stored slots can never misalign.
    pub fn query_group(&mut self, values: Vec<T>) -> Result<Vec<T>> {
        if values.is_empty() {
            return Err(Error::InvalidParameter(
                "cannot pool an empty group".to_string(),
            ));
        }
        match self.group_size {
            None => self.group_size = Some(values.len()),
            Some(size) if size != values.len() => {
                return Err(Error::InvalidParameter(format!(
                    "group size {} does not match the pool's established size {size}",
                    values.len()
                )));
            }
            Some(_) => {}
        }

        if self.capacity == 0 {
            return Ok(values);
        }

        if self.pool.len() < self.capacity {
            self.pool.push(values.clone());
            return Ok(values);
        }

        if self.rng.random::<f64>() < self.pooling_probability {
            let idx = self.rng.random_range(0..self.pool.len());
            Ok(std::mem::replace(&mut self.pool[idx], values))
        } else {
            Ok(values)
        }
    }

    /// Number of stored groups.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether the pool holds no values.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Maximum number of stored groups.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Probability that a full pool answers with a stored value.
    pub fn pooling_probability(&self) -> f64 {
        self.pooling_probability
    }

    /// Whether the pool has reached capacity.
    pub fn is_full(&self) -> bool {
        self.pool.len() == self.capacity
    }

    /// Drop all stored values and reset the group arity.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.group_size = None;
    }
}
