//! Shared configuration loading for TasteRank services
//!
//! All configuration is read from environment variables with the `TASTERANK_`
//! prefix, with `.env` file support via dotenvy. Override hierarchy:
//! defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use tasterank_core::config::{load_dotenv, parse_var, var_or};
//!
//! load_dotenv();
//! let host = var_or("TASTERANK_HOST", "0.0.0.0");
//! let port: u16 = parse_var("TASTERANK_PORT", 8082)?;
//! # Ok::<(), tasterank_core::TasteRankError>(())
//! ```

use crate::error::TasteRankError;
use std::fmt::Display;
use std::str::FromStr;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration
/// from environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a variable cannot be parsed.
    fn from_env() -> Result<Self, TasteRankError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any validation check fails.
    fn validate(&self) -> Result<(), TasteRankError>;
}

/// Load a `.env` file if present. Missing files are not an error.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read an environment variable, falling back to a default.
pub fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable without a default.
pub fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read and parse an environment variable, falling back to a default when
/// the variable is unset.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the variable is set but unparseable.
pub fn parse_var<T>(name: &str, default: T) -> Result<T, TasteRankError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| TasteRankError::configuration(format!("invalid value for {name}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Read and parse an optional environment variable.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the variable is set but unparseable.
pub fn parse_optional_var<T>(name: &str) -> Result<Option<T>, TasteRankError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| TasteRankError::configuration(format!("invalid value for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}
