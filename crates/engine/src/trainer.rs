//! Stochastic gradient descent trainer
//!
//! Fits the biased matrix factorization (global mean + user/item biases +
//! latent factor dot product) to the observed ratings by minimizing
//! regularized squared error. Training is single-threaded and iterates the
//! rating store in its fixed construction order, so a fixed seed makes runs
//! bit-for-bit reproducible.

use crate::model::FactorModel;
use crate::ratings::RatingStore;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tasterank_core::{Result, TasteRankError};

/// SGD hyperparameters
#[derive(Debug, Clone)]
pub struct SvdConfig {
    /// Number of latent factors (embedding dimension)
    pub factors: usize,
    /// Number of passes over the training set
    pub epochs: usize,
    /// Learning rate
    pub learning_rate: f32,
    /// L2 regularization strength
    pub regularization: f32,
    /// Factor entries initialize uniformly in (-init_spread, init_spread).
    /// Nonzero random init breaks the symmetry between factors.
    pub init_spread: f32,
    /// RNG seed for reproducible initialization
    pub seed: u64,
}

impl Default for SvdConfig {
    fn default() -> Self {
        Self {
            factors: 100,
            epochs: 20,
            learning_rate: 0.005,
            regularization: 0.02,
            init_spread: 0.1,
            seed: 42,
        }
    }
}

/// SGD-based matrix factorization trainer
pub struct SvdTrainer {
    config: SvdConfig,
}

impl SvdTrainer {
    pub fn new(config: SvdConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(SvdConfig::default())
    }

    pub fn config(&self) -> &SvdConfig {
        &self.config
    }

    /// Fit a factor model to the rating store.
    ///
    /// A single user or item degrades gracefully to bias-only prediction;
    /// an empty store is a fatal precondition violation.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTrainingSet` if the store holds zero ratings.
    pub fn fit(&self, store: &RatingStore) -> Result<FactorModel> {
        if store.is_empty() {
            return Err(TasteRankError::EmptyTrainingSet);
        }

        let n_users = store.n_users();
        let n_items = store.n_items();
        let k = self.config.factors;
        let lr = self.config.learning_rate;
        let reg = self.config.regularization;
        let (scale_min, scale_max) = store.scale();

        // Global mean is computed once and fixed thereafter.
        let global_mean =
            store.ratings().iter().map(|r| r.value).sum::<f32>() / store.len() as f32;

        let mut user_bias = Array1::<f32>::zeros(n_users);
        let mut item_bias = Array1::<f32>::zeros(n_items);
        let mut user_factors = Array2::<f32>::zeros((n_users, k));
        let mut item_factors = Array2::<f32>::zeros((n_items, k));

        let spread = self.config.init_spread;
        if spread > 0.0 && k > 0 {
            let mut rng = StdRng::seed_from_u64(self.config.seed);
            for i in 0..n_users {
                for j in 0..k {
                    user_factors[[i, j]] = rng.gen_range(-spread..spread);
                }
            }
            for i in 0..n_items {
                for j in 0..k {
                    item_factors[[i, j]] = rng.gen_range(-spread..spread);
                }
            }
        }

        for epoch in 0..self.config.epochs {
            let mut squared_error = 0.0f32;

            for rating in store.ratings() {
                let u = rating.user as usize;
                let i = rating.item as usize;

                // Unclipped estimate: the gradient needs the raw linear
                // value, not one saturated at the scale bounds.
                let estimate = global_mean
                    + user_bias[u]
                    + item_bias[i]
                    + user_factors.row(u).dot(&item_factors.row(i));
                let error = rating.value - estimate;
                squared_error += error * error;

                user_bias[u] += lr * (error - reg * user_bias[u]);
                item_bias[i] += lr * (error - reg * item_bias[i]);

                for f in 0..k {
                    let uf = user_factors[[u, f]];
                    let itf = item_factors[[i, f]];
                    // Simultaneous update: both sides read the old values.
                    user_factors[[u, f]] = uf + lr * (error * itf - reg * uf);
                    item_factors[[i, f]] = itf + lr * (error * uf - reg * itf);
                }
            }

            tracing::debug!(
                epoch,
                mse = squared_error / store.len() as f32,
                "SGD epoch complete"
            );
        }

        Ok(FactorModel::from_parts(
            global_mean,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
            scale_min,
            scale_max,
        ))
    }
}
