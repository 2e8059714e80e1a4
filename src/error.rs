//! Error types for the GPAD exporter.
//!
//! All errors are strongly typed using thiserror. Only three conditions are
//! fatal for an export: an inconsistent source graph, a failing or slow
//! closure provider, and a bad configuration. Everything else (malformed
//! evidence, underived candidates) is recovered locally and counted.

use thiserror::Error;

/// Validation errors for individual data items.
///
/// These never abort an export; the offending item is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field is present but unusable.
    #[error("Field '{field}' is invalid: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ValidationError {
    /// Creates a missing-field error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Failures reported by (or while waiting on) the fact closure provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No answer within the export timeout.
    #[error("Closure query timed out after {duration_ms}ms")]
    Timeout {
        /// The timeout that expired.
        duration_ms: u64,
    },

    /// The provider reported an error.
    #[error("Closure query failed: {message}")]
    QueryFailure {
        /// Provider's error message.
        message: String,
    },

    /// The worker running the export went away.
    #[error("Export worker disconnected before replying")]
    Disconnected,
}

impl ProviderError {
    /// Creates a query failure.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::QueryFailure {
            message: message.into(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config is not valid JSON for [`crate::ExportConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field value is out of its allowed range.
    #[error("Invalid config field '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Top-level error type for an export call.
///
/// A caller receiving `Ok` always gets a complete document (possibly with zero
/// records); any `Err` means no output at all.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The closure types at least one node as `owl:Nothing`.
    #[error("Source graph is inconsistent ({} unsatisfiable node(s))", witnesses.len())]
    SourceInconsistent {
        /// The unsatisfiable nodes.
        witnesses: Vec<String>,
    },

    /// The closure provider failed or timed out.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The exporter could not be configured.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The runtime queue rejected an export.
    #[error("Export queue is full (capacity {capacity}), rejected model '{model_iri}'")]
    QueueFull {
        /// Model whose export was rejected.
        model_iri: String,
        /// Queue capacity at the time.
        capacity: usize,
    },

    /// A failure outside the export logic, such as a worker that failed to start.
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ExportError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if the source graph was inconsistent.
    #[must_use]
    pub const fn is_inconsistent(&self) -> bool {
        matches!(self, Self::SourceInconsistent { .. })
    }

    /// Returns true if the closure provider failed or timed out.
    #[must_use]
    pub const fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Returns true if the export hit its timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Provider(ProviderError::Timeout { .. }))
    }

    /// Exports are never retried internally; a partial document would
    /// misrepresent curated state.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
