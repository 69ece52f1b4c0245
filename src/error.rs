//! Error types for the Rate Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during rate calculation and
//! policy administration.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{CompletionSlab, Tier};

/// The main error type for the Rate Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use rate_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No active rate card exists for the resolved tier and slab.
    ///
    /// This is a hard failure: pricing must never silently default to zero
    /// or an arbitrary rate when the policy row is missing.
    #[error("No active rate card for tier '{tier}' and slab '{slab}'")]
    PolicyNotFound {
        /// The resolved pincode tier.
        tier: Tier,
        /// The requested completion slab.
        slab: CompletionSlab,
        /// The client scope of the lookup, if any.
        client: Option<String>,
    },

    /// A rate card row with the given ID does not exist.
    #[error("Rate card row not found: {id}")]
    RowNotFound {
        /// The ID that was not found.
        id: Uuid,
    },

    /// A rate card row contained an invalid field value.
    #[error("Invalid rate card field '{field}': {message}")]
    InvalidRateRow {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An active rate card already exists for the (tier, slab, client) key.
    #[error("An active rate card already exists for tier '{tier}' and slab '{slab}'")]
    DuplicateActiveRow {
        /// The tier of the conflicting row.
        tier: Tier,
        /// The slab of the conflicting row.
        slab: CompletionSlab,
        /// The client scope of the conflicting row, if any.
        client: Option<String>,
    },

    /// The durable dynamic-pricing configuration source failed.
    ///
    /// Reads recover from this by falling back to the documented default
    /// configuration; writes surface it to the caller.
    #[error("Dynamic pricing config store error: {message}")]
    ConfigStoreError {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
