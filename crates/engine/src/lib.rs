//! TasteRank Recommendation Engine
//!
//! Latent-factor matrix factorization over explicit review ratings, plus the
//! serving pieces around it: identifier interning, sparse rating storage,
//! SGD training, top-N recommendation, versioned model persistence, and the
//! HTTP endpoint.
//!
//! Data flow: cleaned rating rows -> [`RatingStore`] (with both
//! [`IdIndex`]es) -> [`SvdTrainer`] -> [`FactorModel`] -> [`Recommender`]
//! -> ranked raw item ids.

pub mod artifact;
pub mod config;
pub mod data;
pub mod index;
pub mod model;
pub mod ratings;
pub mod recommender;
pub mod server;
pub mod state;
pub mod trainer;

// Re-export key types
pub use artifact::{load_artifact, save_artifact};
pub use config::{ServiceConfig, TrainingJobConfig};
pub use data::load_ratings_csv;
pub use index::{IdIndex, Namespace};
pub use model::FactorModel;
pub use ratings::{Rating, RatingRow, RatingStore};
pub use recommender::Recommender;
pub use server::{AppState, RecommendationResponse};
pub use state::{ModelState, ServingModel};
pub use trainer::{SvdConfig, SvdTrainer};
