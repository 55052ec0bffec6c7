//! Process-wide serving state
//!
//! The trained model and its supporting store are published once as a single
//! immutable bundle. Request handlers take an `Arc` snapshot per request, so
//! a retrain can republish atomically: every reader sees either the old
//! bundle in full or the new one in full, never a mix.

use crate::model::FactorModel;
use crate::ratings::RatingStore;
use std::sync::{Arc, RwLock};

/// Everything a recommendation request needs, bundled immutably
#[derive(Debug)]
pub struct ServingModel {
    pub store: RatingStore,
    pub model: FactorModel,
}

/// Atomically swappable handle to the current serving bundle
#[derive(Debug)]
pub struct ModelState {
    current: RwLock<Arc<ServingModel>>,
}

impl ModelState {
    pub fn new(serving: ServingModel) -> Self {
        Self {
            current: RwLock::new(Arc::new(serving)),
        }
    }

    /// Snapshot of the currently published bundle.
    pub fn current(&self) -> Arc<ServingModel> {
        // Readers never mutate through the lock, so even a poisoned guard
        // still holds a fully published bundle.
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the published bundle. In-flight requests keep their snapshot.
    pub fn publish(&self, serving: ServingModel) {
        let serving = Arc::new(serving);
        match self.current.write() {
            Ok(mut guard) => *guard = serving,
            Err(poisoned) => *poisoned.into_inner() = serving,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::RatingRow;
    use crate::trainer::{SvdConfig, SvdTrainer};

    fn serving(rating: f32) -> ServingModel {
        let store = RatingStore::from_rows(
            &[RatingRow {
                user_id: "u1".to_string(),
                item_id: "i1".to_string(),
                rating,
            }],
            1.0,
            5.0,
        )
        .unwrap();
        let model = SvdTrainer::new(SvdConfig {
            factors: 2,
            epochs: 5,
            ..SvdConfig::default()
        })
        .fit(&store)
        .unwrap();
        ServingModel { store, model }
    }

    #[test]
    fn test_publish_swaps_the_bundle() {
        let state = ModelState::new(serving(2.0));
        let before = state.current();

        state.publish(serving(5.0));
        let after = state.current();

        assert!((before.model.global_mean() - 2.0).abs() < 1e-6);
        assert!((after.model.global_mean() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let state = ModelState::new(serving(2.0));
        let snapshot = state.current();
        state.publish(serving(5.0));

        // The old Arc is still fully usable after the swap.
        assert!((snapshot.model.global_mean() - 2.0).abs() < 1e-6);
    }
}
