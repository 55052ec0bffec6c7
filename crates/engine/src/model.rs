//! Trained factor model and rating estimator
//!
//! Holds the fitted parameters of the biased matrix factorization: global
//! mean, per-user and per-item biases, and the two latent factor matrices.
//! A model is constructed once by the trainer (or the artifact loader) and
//! is read-only afterwards, so it can be shared across concurrent
//! recommendation requests without synchronization.

use ndarray::{Array1, Array2};
use tasterank_core::{Result, TasteRankError};

/// Immutable trained parameters plus scale metadata
#[derive(Debug, Clone, PartialEq)]
pub struct FactorModel {
    global_mean: f32,
    user_bias: Array1<f32>,
    item_bias: Array1<f32>,
    /// User latent factors: [n_users x factor_count]
    user_factors: Array2<f32>,
    /// Item latent factors: [n_items x factor_count]
    item_factors: Array2<f32>,
    scale_min: f32,
    scale_max: f32,
}

impl FactorModel {
    /// Assemble a model from fitted parts. Callers guarantee the bias
    /// vectors and factor matrices agree on entity counts and factor count.
    pub(crate) fn from_parts(
        global_mean: f32,
        user_bias: Array1<f32>,
        item_bias: Array1<f32>,
        user_factors: Array2<f32>,
        item_factors: Array2<f32>,
        scale_min: f32,
        scale_max: f32,
    ) -> Self {
        debug_assert_eq!(user_bias.len(), user_factors.nrows());
        debug_assert_eq!(item_bias.len(), item_factors.nrows());
        debug_assert_eq!(user_factors.ncols(), item_factors.ncols());
        Self {
            global_mean,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
            scale_min,
            scale_max,
        }
    }

    /// Predict the rating for a (user, item) pair, clipped to the scale.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if either internal id is out of range for the
    /// model's arrays. That indicates an index-consistency bug between
    /// components; translating unknown *raw* ids into cold-start handling is
    /// the recommender's job, not the estimator's.
    pub fn predict(&self, user: u32, item: u32) -> Result<f32> {
        let (u, i) = self.check_bounds(user, item)?;
        Ok(self
            .raw_estimate(u, i)
            .clamp(self.scale_min, self.scale_max))
    }

    /// Unclipped linear estimate. The trainer's squared-error gradient needs
    /// the raw value; clipping it would stall learning near the scale bounds.
    pub(crate) fn raw_estimate(&self, u: usize, i: usize) -> f32 {
        self.global_mean
            + self.user_bias[u]
            + self.item_bias[i]
            + self.user_factors.row(u).dot(&self.item_factors.row(i))
    }

    fn check_bounds(&self, user: u32, item: u32) -> Result<(usize, usize)> {
        let u = user as usize;
        let i = item as usize;
        if u >= self.n_users() {
            return Err(TasteRankError::unknown_entity("user", u, self.n_users()));
        }
        if i >= self.n_items() {
            return Err(TasteRankError::unknown_entity("item", i, self.n_items()));
        }
        Ok((u, i))
    }

    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }

    pub fn factor_count(&self) -> usize {
        self.user_factors.ncols()
    }

    pub fn n_users(&self) -> usize {
        self.user_bias.len()
    }

    pub fn n_items(&self) -> usize {
        self.item_bias.len()
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.scale_min, self.scale_max)
    }

    pub fn user_bias(&self) -> &Array1<f32> {
        &self.user_bias
    }

    pub fn item_bias(&self) -> &Array1<f32> {
        &self.item_bias
    }

    pub fn user_factors(&self) -> &Array2<f32> {
        &self.user_factors
    }

    pub fn item_factors(&self) -> &Array2<f32> {
        &self.item_factors
    }
}
