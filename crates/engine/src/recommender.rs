//! Top-N recommendation over a trained factor model
//!
//! Purely read-only: scores every unseen item for a user, keeps those above
//! the score threshold, and returns the top N raw item ids in deterministic
//! order. Unknown users are the cold-start case and yield an empty list
//! rather than an error.

use crate::model::FactorModel;
use crate::ratings::RatingStore;
use tasterank_core::{Result, TasteRankError};
use tracing::debug;

/// Read-only recommendation view over a store and its trained model
pub struct Recommender<'a> {
    store: &'a RatingStore,
    model: &'a FactorModel,
}

impl<'a> Recommender<'a> {
    pub fn new(store: &'a RatingStore, model: &'a FactorModel) -> Self {
        Self { store, model }
    }

    /// Rank the user's unseen items and return at most `top_n` raw item ids.
    ///
    /// Only items with predicted score strictly greater than `min_score`
    /// are retained. Ties are broken by ascending internal item id so two
    /// calls with identical arguments return identical output.
    ///
    /// # Errors
    ///
    /// Internal index inconsistencies surface as `UnknownEntity`; an
    /// unknown raw user id is not an error and returns an empty list.
    pub fn recommend(
        &self,
        raw_user_id: &str,
        top_n: usize,
        min_score: f32,
    ) -> Result<Vec<String>> {
        let user = match self.store.users().to_internal(raw_user_id) {
            Ok(user) => user,
            Err(err) if err.is_cold_start() => {
                debug!(user_id = raw_user_id, "unknown user, returning no recommendations");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let seen = self.store.items_rated_by(user);
        let mut scored: Vec<(u32, f32)> = Vec::new();

        for item in self.store.all_item_ids() {
            if seen.is_some_and(|items| items.contains(&item)) {
                continue;
            }
            let score = self.model.predict(user, item)?;
            if score > min_score {
                scored.push((item, score));
            }
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_n);

        scored
            .into_iter()
            .map(|(item, _)| {
                self.store
                    .items()
                    .to_raw(item)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        TasteRankError::unknown_entity("item", item as usize, self.store.n_items())
                    })
            })
            .collect()
    }
}
