//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (CredError) for the entire application
//! - Inference failures keep their cause (connect, HTTP status, parse,
//!   timeout) so the coordinator can report precisely what went wrong
//! - No panic/unwrap - all errors are recoverable or surfaced as a
//!   degraded summary at the pipeline boundary

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Inference Errors
    // -------------------------------------------------------------------------
    /// Endpoint could not be reached at all
    #[error("Inference backend unavailable at {endpoint}: {message}")]
    InferenceUnavailable { endpoint: String, message: String },

    /// Endpoint answered with a non-success status
    #[error("Inference request failed ({status}): {message}")]
    InferenceRequestFailed { status: u16, message: String },

    /// Response body could not be parsed or failed schema validation
    #[error("Malformed inference response: {0}")]
    InferenceResponseMalformed(String),

    /// Request exceeded the per-call deadline
    #[error("Inference timed out after {duration:?}: {operation}")]
    InferenceTimeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Pipeline Preconditions
    // -------------------------------------------------------------------------
    /// Raised before the pipeline starts when free memory is critical
    #[error("{message}")]
    InsufficientResources { free_bytes: u64, message: String },

    /// A second analyze() was attempted while one is in flight
    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    /// Input text rejected before the pipeline starts
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CredError>;

impl CredError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::InferenceTimeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::InferenceResponseMalformed(message.into())
    }

    /// True for any failure originating at the inference boundary.
    ///
    /// The coordinator converts these into a degraded summary instead of
    /// propagating them to the caller.
    pub fn is_inference(&self) -> bool {
        matches!(
            self,
            Self::InferenceUnavailable { .. }
                | Self::InferenceRequestFailed { .. }
                | Self::InferenceResponseMalformed(_)
                | Self::InferenceTimeout { .. }
        )
    }

    /// True for precondition failures raised before the pipeline starts.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::InsufficientResources { .. } | Self::AnalysisInProgress | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_classification() {
        assert!(CredError::malformed("bad json").is_inference());
        assert!(
            CredError::timeout("screener", Duration::from_secs(60)).is_inference()
        );
        assert!(!CredError::Config("x".into()).is_inference());
    }

    #[test]
    fn test_preflight_classification() {
        let err = CredError::InsufficientResources {
            free_bytes: 0,
            message: "low memory".into(),
        };
        assert!(err.is_preflight());
        assert!(!err.is_inference());
        assert!(CredError::AnalysisInProgress.is_preflight());
    }

    #[test]
    fn test_display_includes_context() {
        let err = CredError::InferenceRequestFailed {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert!(err.to_string().contains("503"));

        let err = CredError::InferenceUnavailable {
            endpoint: "http://127.0.0.1:8080".into(),
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("127.0.0.1"));
    }
}
