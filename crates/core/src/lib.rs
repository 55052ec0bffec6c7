//! # TasteRank Core
//!
//! Shared building blocks for the TasteRank recommendation platform.
//!
//! ## Modules
//!
//! - `error`: Error taxonomy and handling
//! - `config`: Environment-based configuration loading

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{load_dotenv, optional_var, parse_optional_var, parse_var, var_or, ConfigLoader};
pub use error::TasteRankError;

/// Result type alias for TasteRank operations
pub type Result<T> = std::result::Result<T, TasteRankError>;
