//! Unified error types for `WealthTracker`.
//!
//! Expected conditions (a missing record, an empty or corrupt partition) are never
//! errors; they come back as `Option`, `bool` or an empty `Vec`. Only configuration
//! problems and real storage-medium failures surface here.

use thiserror::Error;

/// Errors produced by the wealth tracker library and binary.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Connection or schema setup failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The storage medium failed while reading or writing a partition
    #[error("Storage failure on partition '{partition}': {source}")]
    Storage {
        /// Partition key being accessed
        partition: String,
        /// Underlying database error
        source: sea_orm::DbErr,
    },

    /// A partition could not be encoded for persistence
    #[error("Failed to serialize partition '{partition}': {source}")]
    Serialization {
        /// Partition key being written
        partition: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A record's fields failed a presentation-layer check
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::Validation`] for `field`.
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns true if this error came from the storage medium rather than from
    /// configuration or input, i.e. the caller may retry.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Database(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
