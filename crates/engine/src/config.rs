//! Engine service and training-job configuration
//!
//! Loaded from `TASTERANK_`-prefixed environment variables through the
//! shared `ConfigLoader` trait, with `.env` support in the binaries.

use crate::trainer::SvdConfig;
use std::path::PathBuf;
use tasterank_core::config::{parse_optional_var, parse_var, var_or, ConfigLoader};
use tasterank_core::{Result, TasteRankError};

/// HTTP serving configuration
///
/// # Environment Variables
///
/// - `TASTERANK_HOST` (default: 0.0.0.0)
/// - `TASTERANK_PORT` (default: 8082)
/// - `TASTERANK_WORKERS` (default: actix default)
/// - `TASTERANK_MODEL_PATH` (default: models/recommendation_model.bin)
/// - `TASTERANK_DEFAULT_COUNT` (default: 5)
/// - `TASTERANK_MAX_COUNT` (default: 100)
/// - `TASTERANK_MIN_SCORE` (default: 3.5) — predicted-score threshold;
///   configurable rather than hard-coded so non-[1,5] scales keep working
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub model_path: PathBuf,
    pub default_count: usize,
    pub max_count: usize,
    pub min_score: f32,
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: var_or("TASTERANK_HOST", "0.0.0.0"),
            port: parse_var("TASTERANK_PORT", 8082)?,
            workers: parse_optional_var("TASTERANK_WORKERS")?,
            model_path: PathBuf::from(var_or(
                "TASTERANK_MODEL_PATH",
                "models/recommendation_model.bin",
            )),
            default_count: parse_var("TASTERANK_DEFAULT_COUNT", 5)?,
            max_count: parse_var("TASTERANK_MAX_COUNT", 100)?,
            min_score: parse_var("TASTERANK_MIN_SCORE", 3.5)?,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(TasteRankError::configuration("port must be nonzero"));
        }
        if self.default_count == 0 || self.default_count > self.max_count {
            return Err(TasteRankError::configuration(format!(
                "default count {} must be in [1, {}]",
                self.default_count, self.max_count
            )));
        }
        if !self.min_score.is_finite() {
            return Err(TasteRankError::configuration("min score must be finite"));
        }
        Ok(())
    }
}

/// Batch training configuration
///
/// # Environment Variables
///
/// - `TASTERANK_RATINGS_PATH` (default: data/reviews.csv)
/// - `TASTERANK_MODEL_PATH` (default: models/recommendation_model.bin)
/// - `TASTERANK_SCALE_MIN` / `TASTERANK_SCALE_MAX` (default: 1.0 / 5.0)
/// - `TASTERANK_FACTORS` (default: 100)
/// - `TASTERANK_EPOCHS` (default: 20)
/// - `TASTERANK_LEARNING_RATE` (default: 0.005)
/// - `TASTERANK_REGULARIZATION` (default: 0.02)
/// - `TASTERANK_INIT_SPREAD` (default: 0.1)
/// - `TASTERANK_SEED` (default: 42)
#[derive(Debug, Clone)]
pub struct TrainingJobConfig {
    pub ratings_path: PathBuf,
    pub model_path: PathBuf,
    pub scale_min: f32,
    pub scale_max: f32,
    pub svd: SvdConfig,
}

impl ConfigLoader for TrainingJobConfig {
    fn from_env() -> Result<Self> {
        let defaults = SvdConfig::default();
        Ok(Self {
            ratings_path: PathBuf::from(var_or("TASTERANK_RATINGS_PATH", "data/reviews.csv")),
            model_path: PathBuf::from(var_or(
                "TASTERANK_MODEL_PATH",
                "models/recommendation_model.bin",
            )),
            scale_min: parse_var("TASTERANK_SCALE_MIN", 1.0)?,
            scale_max: parse_var("TASTERANK_SCALE_MAX", 5.0)?,
            svd: SvdConfig {
                factors: parse_var("TASTERANK_FACTORS", defaults.factors)?,
                epochs: parse_var("TASTERANK_EPOCHS", defaults.epochs)?,
                learning_rate: parse_var("TASTERANK_LEARNING_RATE", defaults.learning_rate)?,
                regularization: parse_var("TASTERANK_REGULARIZATION", defaults.regularization)?,
                init_spread: parse_var("TASTERANK_INIT_SPREAD", defaults.init_spread)?,
                seed: parse_var("TASTERANK_SEED", defaults.seed)?,
            },
        })
    }

    fn validate(&self) -> Result<()> {
        if !self.scale_min.is_finite() || !self.scale_max.is_finite() {
            return Err(TasteRankError::configuration("rating scale must be finite"));
        }
        if self.scale_min >= self.scale_max {
            return Err(TasteRankError::configuration(format!(
                "invalid rating scale [{}, {}]",
                self.scale_min, self.scale_max
            )));
        }
        if self.svd.epochs == 0 {
            return Err(TasteRankError::configuration("epochs must be at least 1"));
        }
        if self.svd.learning_rate <= 0.0 {
            return Err(TasteRankError::configuration("learning rate must be positive"));
        }
        if self.svd.regularization < 0.0 {
            return Err(TasteRankError::configuration(
                "regularization must be non-negative",
            ));
        }
        if self.svd.init_spread < 0.0 {
            return Err(TasteRankError::configuration(
                "init spread must be non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults_validate() {
        let config = ServiceConfig {
            host: "0.0.0.0".to_string(),
            port: 8082,
            workers: None,
            model_path: PathBuf::from("models/recommendation_model.bin"),
            default_count: 5,
            max_count: 100,
            min_score: 3.5,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_service_config_rejects_count_above_max() {
        let config = ServiceConfig {
            host: "0.0.0.0".to_string(),
            port: 8082,
            workers: None,
            model_path: PathBuf::from("model.bin"),
            default_count: 500,
            max_count: 100,
            min_score: 3.5,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_training_config_rejects_inverted_scale() {
        let config = TrainingJobConfig {
            ratings_path: PathBuf::from("data/reviews.csv"),
            model_path: PathBuf::from("model.bin"),
            scale_min: 5.0,
            scale_max: 1.0,
            svd: SvdConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_training_config_rejects_zero_learning_rate() {
        let config = TrainingJobConfig {
            ratings_path: PathBuf::from("data/reviews.csv"),
            model_path: PathBuf::from("model.bin"),
            scale_min: 1.0,
            scale_max: 5.0,
            svd: SvdConfig {
                learning_rate: 0.0,
                ..SvdConfig::default()
            },
        };
        assert!(config.validate().is_err());
    }
}
