//! Versioned model artifact persistence
//!
//! A single binary file carries everything serving needs: both identifier
//! tables, the rating triples (from which per-user rated sets are rebuilt),
//! and the trained factor model. The payload is bincode behind a 4-byte
//! magic header plus an explicit schema version, so an incompatible trainer
//! and server detect each other instead of deserializing garbage.

use crate::index::{IdIndex, Namespace};
use crate::model::FactorModel;
use crate::ratings::RatingStore;
use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tasterank_core::{Result, TasteRankError};
use tracing::info;

const ARTIFACT_MAGIC: [u8; 4] = *b"TRNK";
const SCHEMA_VERSION: u32 = 1;

/// Serializable layout of the trained model and its supporting indices
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    schema_version: u32,
    trained_at: DateTime<Utc>,
    scale_min: f32,
    scale_max: f32,
    /// Raw user ids in internal-index order
    user_ids: Vec<String>,
    /// Raw item ids in internal-index order
    item_ids: Vec<String>,
    /// (user, item, rating) triples in store order
    ratings: Vec<(u32, u32, f32)>,
    global_mean: f32,
    user_bias: Vec<f32>,
    item_bias: Vec<f32>,
    factor_count: usize,
    /// Row-major [n_users x factor_count]
    user_factors: Vec<f32>,
    /// Row-major [n_items x factor_count]
    item_factors: Vec<f32>,
}

/// Write the trained model and its indices to `path`.
///
/// # Errors
///
/// Returns `ModelLoad` on encoding failure and `Io` on filesystem failure.
pub fn save_artifact(path: &Path, store: &RatingStore, model: &FactorModel) -> Result<()> {
    let artifact = ModelArtifact {
        schema_version: SCHEMA_VERSION,
        trained_at: Utc::now(),
        scale_min: model.scale().0,
        scale_max: model.scale().1,
        user_ids: store.users().raw_ids().to_vec(),
        item_ids: store.items().raw_ids().to_vec(),
        ratings: store
            .ratings()
            .iter()
            .map(|r| (r.user, r.item, r.value))
            .collect(),
        global_mean: model.global_mean(),
        user_bias: model.user_bias().to_vec(),
        item_bias: model.item_bias().to_vec(),
        factor_count: model.factor_count(),
        user_factors: model.user_factors().iter().copied().collect(),
        item_factors: model.item_factors().iter().copied().collect(),
    };

    let payload = bincode::serialize(&artifact)
        .map_err(|e| TasteRankError::model_load(format!("failed to encode artifact: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(path)?;
    file.write_all(&ARTIFACT_MAGIC)?;
    file.write_all(&payload)?;

    info!(
        path = %path.display(),
        bytes = payload.len() + ARTIFACT_MAGIC.len(),
        users = artifact.user_ids.len(),
        items = artifact.item_ids.len(),
        "Model artifact saved"
    );
    Ok(())
}

/// Load an artifact and reconstruct the rating store and factor model,
/// ready for serving without retraining.
///
/// # Errors
///
/// Returns `ModelLoad` if the file is missing, truncated, carries the wrong
/// magic or schema version, or its arrays are internally inconsistent.
pub fn load_artifact(path: &Path) -> Result<(RatingStore, FactorModel)> {
    let bytes = fs::read(path).map_err(|e| {
        TasteRankError::model_load(format!("cannot read {}: {e}", path.display()))
    })?;

    if bytes.len() < ARTIFACT_MAGIC.len() || bytes[..ARTIFACT_MAGIC.len()] != ARTIFACT_MAGIC {
        return Err(TasteRankError::model_load(format!(
            "{} is not a TasteRank model artifact",
            path.display()
        )));
    }

    let artifact: ModelArtifact = bincode::deserialize(&bytes[ARTIFACT_MAGIC.len()..])
        .map_err(|e| TasteRankError::model_load(format!("failed to decode artifact: {e}")))?;

    if artifact.schema_version != SCHEMA_VERSION {
        return Err(TasteRankError::model_load(format!(
            "unsupported artifact schema version {} (expected {})",
            artifact.schema_version, SCHEMA_VERSION
        )));
    }

    restore(artifact)
}

fn restore(artifact: ModelArtifact) -> Result<(RatingStore, FactorModel)> {
    let n_users = artifact.user_ids.len();
    let n_items = artifact.item_ids.len();
    let k = artifact.factor_count;

    if artifact.user_bias.len() != n_users || artifact.item_bias.len() != n_items {
        return Err(TasteRankError::model_load(
            "bias vector length does not match id tables",
        ));
    }

    let users = IdIndex::from_raw_ids(Namespace::User, artifact.user_ids);
    let items = IdIndex::from_raw_ids(Namespace::Item, artifact.item_ids);
    let store = RatingStore::from_parts(
        users,
        items,
        artifact.ratings,
        artifact.scale_min,
        artifact.scale_max,
    )?;

    let user_factors = Array2::from_shape_vec((n_users, k), artifact.user_factors)
        .map_err(|e| TasteRankError::model_load(format!("bad user factor shape: {e}")))?;
    let item_factors = Array2::from_shape_vec((n_items, k), artifact.item_factors)
        .map_err(|e| TasteRankError::model_load(format!("bad item factor shape: {e}")))?;

    let model = FactorModel::from_parts(
        artifact.global_mean,
        Array1::from_vec(artifact.user_bias),
        Array1::from_vec(artifact.item_bias),
        user_factors,
        item_factors,
        artifact.scale_min,
        artifact.scale_max,
    );

    Ok((store, model))
}
