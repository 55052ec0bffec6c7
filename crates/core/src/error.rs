//! Error types for the TasteRank platform
//!
//! Identifier-resolution failures (`UnknownIdentifier`) are the only errors
//! expected during normal serving and are handled locally by the recommender
//! as a cold-start branch. Every other kind indicates bad input data or an
//! internal invariant violation and must stop the affected pipeline.

use thiserror::Error;

/// Platform-wide error taxonomy
#[derive(Debug, Error)]
pub enum TasteRankError {
    /// A training input rating fell outside the declared scale.
    /// Fatal precondition violation: garbage-in must not corrupt the model.
    #[error("invalid rating {value} outside scale [{min}, {max}]")]
    InvalidRating { value: f32, min: f32, max: f32 },

    /// Zero ratings available; training cannot proceed.
    #[error("training set contains no ratings")]
    EmptyTrainingSet,

    /// A raw id that was never seen during training. Recoverable at the
    /// recommender boundary (cold start), never propagated to callers.
    #[error("unknown {namespace} identifier: {id}")]
    UnknownIdentifier { namespace: &'static str, id: String },

    /// An internal index out of range for the model's arrays. Indicates an
    /// index-consistency bug between components, never expected in correct
    /// operation.
    #[error("internal {namespace} index {index} out of range for model with {count} entries")]
    UnknownEntity {
        namespace: &'static str,
        index: usize,
        count: usize,
    },

    /// Persisted model artifact missing, truncated, or version-incompatible.
    /// Fatal at startup: the service must not come up with a partial model.
    #[error("model artifact error: {0}")]
    ModelLoad(String),

    /// Training input could not be read or parsed.
    #[error("training data error: {0}")]
    DataLoad(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TasteRankError {
    /// Create an `UnknownIdentifier` error for a raw id lookup miss
    pub fn unknown_identifier(namespace: &'static str, id: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            namespace,
            id: id.into(),
        }
    }

    /// Create an `UnknownEntity` error for an out-of-range internal index
    pub fn unknown_entity(namespace: &'static str, index: usize, count: usize) -> Self {
        Self::UnknownEntity {
            namespace,
            index,
            count,
        }
    }

    /// Create a `ModelLoad` error
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad(message.into())
    }

    /// Create a `DataLoad` error
    pub fn data_load(message: impl Into<String>) -> Self {
        Self::DataLoad(message.into())
    }

    /// Create a `ConfigurationError`
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    /// Whether this error is the expected cold-start case
    pub fn is_cold_start(&self) -> bool {
        matches!(self, Self::UnknownIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rating_display() {
        let err = TasteRankError::InvalidRating {
            value: 7.0,
            min: 1.0,
            max: 5.0,
        };
        assert_eq!(err.to_string(), "invalid rating 7 outside scale [1, 5]");
    }

    #[test]
    fn test_unknown_identifier_is_cold_start() {
        let err = TasteRankError::unknown_identifier("user", "u-42");
        assert!(err.is_cold_start());
        assert_eq!(err.to_string(), "unknown user identifier: u-42");
    }

    #[test]
    fn test_other_errors_are_not_cold_start() {
        assert!(!TasteRankError::EmptyTrainingSet.is_cold_start());
        assert!(!TasteRankError::unknown_entity("item", 9, 3).is_cold_start());
        assert!(!TasteRankError::model_load("truncated").is_cold_start());
    }

    #[test]
    fn test_unknown_entity_display() {
        let err = TasteRankError::unknown_entity("item", 9, 3);
        assert_eq!(
            err.to_string(),
            "internal item index 9 out of range for model with 3 entries"
        );
    }
}
