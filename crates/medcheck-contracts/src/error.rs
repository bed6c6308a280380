//! Error types shared by every MEDCHECK crate.
//!
//! All fallible operations return `MedCheckResult<T>`. Nothing here is fatal to
//! the process: each variant is scoped to the single user action that raised it.

use thiserror::Error;

/// The message surfaced when an upload yields no usable interaction records.
pub const NO_VALID_DATA: &str = "no valid drug interaction data found";

/// The unified error type for MEDCHECK.
#[derive(Debug, Error)]
pub enum MedCheckError {
    /// An uploaded dataset could not be parsed or contained no valid records.
    ///
    /// The upload is discarded as a whole; no partial dataset is created.
    #[error("dataset validation failed: {reason}")]
    ValidationFailed { reason: String },

    /// No dataset with the given id is registered in the session.
    #[error("dataset '{id}' not found")]
    DatasetNotFound { id: String },

    /// An operation needed an active dataset but the built-in table is in use.
    #[error("no dataset is active")]
    NoActiveDataset,

    /// An analysis is already pending; the analyze action is unavailable.
    #[error("an analysis is already in progress")]
    AnalysisInProgress,

    /// `finish_analysis` was called with no task pending.
    #[error("no analysis is pending")]
    NoPendingAnalysis,

    /// The analysis task did not run to completion.
    #[error("analysis aborted: {reason}")]
    AnalysisAborted { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Reading or writing a file failed.
    #[error("i/o error: {reason}")]
    Io { reason: String },

    /// A dataset could not be serialized for export.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl MedCheckError {
    /// The standard rejection for an upload with zero surviving records.
    pub fn no_valid_data() -> Self {
        Self::ValidationFailed {
            reason: NO_VALID_DATA.to_string(),
        }
    }
}

/// Convenience alias used throughout the MEDCHECK crates.
pub type MedCheckResult<T> = Result<T, MedCheckError>;
