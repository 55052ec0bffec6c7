//! TasteRank Trainer - Batch Model Fitting
//!
//! Loads cleaned rating rows, builds the identifier indices and rating
//! store, fits the factor model by SGD, and writes the versioned artifact
//! consumed by the serving binary.

use tasterank_core::config::{load_dotenv, ConfigLoader};
use tasterank_engine::{load_ratings_csv, save_artifact, RatingStore, SvdTrainer, TrainingJobConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .json()
        .init();

    let config = TrainingJobConfig::from_env()?;
    config.validate()?;

    info!(path = %config.ratings_path.display(), "Loading ratings");
    let rows = load_ratings_csv(&config.ratings_path)?;

    let store = RatingStore::from_rows(&rows, config.scale_min, config.scale_max)?;
    info!(
        users = store.n_users(),
        items = store.n_items(),
        ratings = store.len(),
        "Training set built"
    );

    let trainer = SvdTrainer::new(config.svd.clone());
    info!(
        factors = config.svd.factors,
        epochs = config.svd.epochs,
        learning_rate = config.svd.learning_rate,
        regularization = config.svd.regularization,
        seed = config.svd.seed,
        "Fitting factor model"
    );
    let model = trainer.fit(&store)?;

    save_artifact(&config.model_path, &store, &model)?;
    info!(path = %config.model_path.display(), "Model saved successfully");

    Ok(())
}
