//! Error types for storage operations

use thiserror::Error;

/// Caller-contract violations. A failed call leaves the storage untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Index out of range: {index} (count is {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Not enough values to remove: requested {requested}, available {available}")]
    Underflow { requested: usize, available: usize },

    #[error("Cannot insert the contents of an empty sequence")]
    EmptyInput,
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
