/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing file could not be read or written
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Stored data does not have the expected shape
    #[error("Corrupt value under key {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    /// Create a corrupt value error
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for animagery_core::AnimageryError {
    fn from(err: StorageError) -> Self {
        animagery_core::AnimageryError::storage(err.to_string())
    }
}
