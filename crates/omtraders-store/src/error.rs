//! # Storage Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / std::io::Error / serde_json::Error                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds categorization                        │
//! │       │                                                                 │
//! │       ├── Remote errors are absorbed by the fallback store and         │
//! │       │   retried against local persistence (logged, not surfaced)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Notification side channel ← What the user actually sees               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote document-store request failed.
    ///
    /// ## When This Occurs
    /// - Network failure or DNS error
    /// - Non-2xx response from the Data API
    /// - Response body doesn't match the expected shape
    ///
    /// The fallback store absorbs this variant and retries locally; it only
    /// reaches a caller that talks to the remote backend directly.
    #[error("Remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    /// The local persistence area could not be written.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - Disk full or file permissions issue
    ///
    /// Read-side problems never produce this: a missing or corrupt
    /// collection file reads as an empty collection.
    #[error("Local persistence failed: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A business rule rejected the operation before any write.
    #[error(transparent)]
    Core(#[from] omtraders_core::CoreError),
}

impl From<omtraders_core::ValidationError> for StoreError {
    fn from(err: omtraders_core::ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use omtraders_core::ValidationError;

    #[test]
    fn test_validation_error_wraps_into_core() {
        let err: StoreError = ValidationError::Required {
            field: "customerName".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Core(_)));
        assert_eq!(err.to_string(), "Validation error: customerName is required");
    }
}
