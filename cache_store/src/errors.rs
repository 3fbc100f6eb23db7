//! Error types for store operations
//!
//! Every storage backend reports failures through [`StoreError`]. A missing
//! key is always [`StoreError::NotFound`], whatever signal the backend used
//! to report it.

use thiserror::Error;

/// Boxed error coming out of a backend client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("value not found in store")]
    NotFound {
        #[source]
        cause: Option<BoxError>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Backend(BoxError),
}

impl StoreError {
    /// Not-found error without an underlying cause
    pub fn not_found() -> Self {
        Self::NotFound { cause: None }
    }

    /// Not-found error wrapping the backend's own "absent" signal
    pub fn not_found_with_cause<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::NotFound {
            cause: Some(cause.into()),
        }
    }

    /// Wrap any backend failure, keeping its message untouched
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Backend(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_keeps_cause() {
        let err = StoreError::not_found_with_cause("valkey nil message");

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "value not found in store");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("valkey nil message".to_string())
        );
    }

    #[test]
    fn test_not_found_without_cause() {
        let err = StoreError::not_found();
        assert!(err.is_not_found());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let err = StoreError::backend("flush error");

        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "flush error");
    }
}
