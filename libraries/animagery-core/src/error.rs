/// Core error types for Animagery
use thiserror::Error;

/// Result type alias using `AnimageryError`
pub type Result<T> = std::result::Result<T, AnimageryError>;

/// Core error type for Animagery
#[derive(Error, Debug)]
pub enum AnimageryError {
    /// An account with this email already exists
    #[error("An account with email {0} already exists")]
    DuplicateEmail(String),

    /// Email and secret do not match any account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A list mutation was attempted with no active session
    #[error("Sign in required")]
    AuthenticationRequired,

    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AnimageryError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error should be shown next to a sign-in/sign-up form
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEmail(_) | Self::InvalidCredentials | Self::AuthenticationRequired
        )
    }
}
