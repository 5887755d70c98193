//! Error types for the lazyq crate.

use thiserror::Error;

/// Boxed error returned by fallible user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when composing or consuming a sequence.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A predicate, selector or key selector failed.
    ///
    /// `position` is the 0-based index of the failing element within the
    /// input of the operator that owns the callback.
    #[error("{operator} callback failed at position {position}")]
    Callback {
        operator: &'static str,
        position: usize,
        #[source]
        source: BoxError,
    },

    /// Operator parameters that can never produce a meaningful sequence.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup of a key that a dictionary does not contain.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// Two elements produced the same key while building a dictionary.
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },
}

impl QueryError {
    pub(crate) fn callback(operator: &'static str, position: usize, source: BoxError) -> Self {
        tracing::debug!(operator, position, error = %source, "callback failed");
        QueryError::Callback {
            operator,
            position,
            source,
        }
    }

    /// Returns the element position for callback failures.
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::Callback { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for lazyq operations.
pub type Result<T> = std::result::Result<T, QueryError>;
