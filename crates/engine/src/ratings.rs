//! Sparse rating storage
//!
//! The rating store owns the observed (user, item, rating) triples together
//! with the identifier indices built from the same raw rating set, so both
//! always reference one internal-id space. Ratings are never mutated after
//! load; retraining rebuilds the store wholesale.

use crate::index::{IdIndex, Namespace};
use serde::Deserialize;
use std::collections::HashSet;
use tasterank_core::{Result, TasteRankError};

/// One cleaned rating row at the training-input boundary.
///
/// Upstream data preparation has already deduplicated and null-filtered;
/// the store only enforces the rating scale.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRow {
    pub user_id: String,
    pub item_id: String,
    pub rating: f32,
}

/// A single observation over internal ids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub user: u32,
    pub item: u32,
    pub value: f32,
}

/// The sparse training set: validated rating triples, per-user rated-item
/// sets, and the identifier indices for both namespaces.
#[derive(Debug, Clone)]
pub struct RatingStore {
    users: IdIndex,
    items: IdIndex,
    ratings: Vec<Rating>,
    rated_by_user: Vec<HashSet<u32>>,
    scale_min: f32,
    scale_max: f32,
}

impl RatingStore {
    /// Build the store and both identifier indices from cleaned rating rows.
    ///
    /// Internal indices are assigned in first-seen order, so the store's
    /// iteration order is the input order and is stable across runs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRating` if any rating is non-finite or outside
    /// `[scale_min, scale_max]`, and `ConfigurationError` for a degenerate
    /// scale.
    pub fn from_rows(rows: &[RatingRow], scale_min: f32, scale_max: f32) -> Result<Self> {
        if !scale_min.is_finite() || !scale_max.is_finite() || scale_min >= scale_max {
            return Err(TasteRankError::configuration(format!(
                "invalid rating scale [{scale_min}, {scale_max}]"
            )));
        }

        let mut users = IdIndex::new(Namespace::User);
        let mut items = IdIndex::new(Namespace::Item);
        let mut ratings = Vec::with_capacity(rows.len());

        for row in rows {
            if !row.rating.is_finite() || row.rating < scale_min || row.rating > scale_max {
                return Err(TasteRankError::InvalidRating {
                    value: row.rating,
                    min: scale_min,
                    max: scale_max,
                });
            }
            let user = users.intern(&row.user_id);
            let item = items.intern(&row.item_id);
            ratings.push(Rating {
                user,
                item,
                value: row.rating,
            });
        }

        let rated_by_user = build_rated_sets(&ratings, users.len());

        Ok(Self {
            users,
            items,
            ratings,
            rated_by_user,
            scale_min,
            scale_max,
        })
    }

    /// Reassemble a store from artifact parts, re-deriving the per-user
    /// rated sets.
    ///
    /// # Errors
    ///
    /// Returns `ModelLoad` if any triple references an index outside the
    /// id tables.
    pub(crate) fn from_parts(
        users: IdIndex,
        items: IdIndex,
        triples: Vec<(u32, u32, f32)>,
        scale_min: f32,
        scale_max: f32,
    ) -> Result<Self> {
        let mut ratings = Vec::with_capacity(triples.len());
        for (user, item, value) in triples {
            if user as usize >= users.len() || item as usize >= items.len() {
                return Err(TasteRankError::model_load(format!(
                    "rating triple ({user}, {item}) outside id tables ({} users, {} items)",
                    users.len(),
                    items.len()
                )));
            }
            ratings.push(Rating { user, item, value });
        }

        let rated_by_user = build_rated_sets(&ratings, users.len());

        Ok(Self {
            users,
            items,
            ratings,
            rated_by_user,
            scale_min,
            scale_max,
        })
    }

    /// Read-only view of all observations, in fixed construction order.
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Item ids the user has rated. `None` for out-of-range users.
    pub fn items_rated_by(&self, user: u32) -> Option<&HashSet<u32>> {
        self.rated_by_user.get(user as usize)
    }

    /// All internal item ids, in ascending order. Indices are dense, so the
    /// full id set is the range `[0, n_items)`.
    pub fn all_item_ids(&self) -> impl Iterator<Item = u32> {
        0..self.n_items() as u32
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.scale_min, self.scale_max)
    }

    pub fn users(&self) -> &IdIndex {
        &self.users
    }

    pub fn items(&self) -> &IdIndex {
        &self.items
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

fn build_rated_sets(ratings: &[Rating], n_users: usize) -> Vec<HashSet<u32>> {
    let mut rated_by_user = vec![HashSet::new(); n_users];
    for rating in ratings {
        rated_by_user[rating.user as usize].insert(rating.item);
    }
    rated_by_user
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: &str, item_id: &str, rating: f32) -> RatingRow {
        RatingRow {
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            rating,
        }
    }

    #[test]
    fn test_from_rows_builds_dense_indices() {
        let store = RatingStore::from_rows(
            &[
                row("u1", "i1", 5.0),
                row("u1", "i2", 1.0),
                row("u2", "i1", 4.0),
            ],
            1.0,
            5.0,
        )
        .unwrap();

        assert_eq!(store.n_users(), 2);
        assert_eq!(store.n_items(), 2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.users().to_internal("u2").unwrap(), 1);
        assert_eq!(store.items().to_raw(1), Some("i2"));
        assert_eq!(store.scale(), (1.0, 5.0));
    }

    #[test]
    fn test_out_of_scale_rating_is_rejected() {
        let err = RatingStore::from_rows(&[row("u1", "i1", 6.0)], 1.0, 5.0).unwrap_err();
        assert!(matches!(err, TasteRankError::InvalidRating { .. }));

        let err = RatingStore::from_rows(&[row("u1", "i1", f32::NAN)], 1.0, 5.0).unwrap_err();
        assert!(matches!(err, TasteRankError::InvalidRating { .. }));
    }

    #[test]
    fn test_degenerate_scale_is_rejected() {
        let err = RatingStore::from_rows(&[row("u1", "i1", 3.0)], 5.0, 1.0).unwrap_err();
        assert!(matches!(err, TasteRankError::ConfigurationError(_)));
    }

    #[test]
    fn test_items_rated_by() {
        let store = RatingStore::from_rows(
            &[
                row("u1", "i1", 5.0),
                row("u1", "i2", 1.0),
                row("u2", "i3", 4.0),
            ],
            1.0,
            5.0,
        )
        .unwrap();

        let rated = store.items_rated_by(0).unwrap();
        assert_eq!(rated.len(), 2);
        assert!(rated.contains(&0) && rated.contains(&1));

        let rated = store.items_rated_by(1).unwrap();
        assert_eq!(rated.len(), 1);
        assert!(store.items_rated_by(7).is_none());
    }

    #[test]
    fn test_all_item_ids_is_dense_ascending() {
        let store = RatingStore::from_rows(
            &[row("u1", "i1", 2.0), row("u1", "i2", 3.0), row("u2", "i3", 4.0)],
            1.0,
            5.0,
        )
        .unwrap();
        let ids: Vec<u32> = store.all_item_ids().collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_from_parts_rejects_inconsistent_triples() {
        let users = IdIndex::from_raw_ids(Namespace::User, vec!["u1".to_string()]);
        let items = IdIndex::from_raw_ids(Namespace::Item, vec!["i1".to_string()]);
        let err =
            RatingStore::from_parts(users, items, vec![(0, 5, 3.0)], 1.0, 5.0).unwrap_err();
        assert!(matches!(err, TasteRankError::ModelLoad(_)));
    }
}
