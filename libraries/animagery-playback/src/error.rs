//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Host refused to start playback (e.g. autoplay policy)
    #[error("Playback refused: {0}")]
    PlayRefused(String),

    /// Host refused full-screen presentation
    #[error("Fullscreen request denied")]
    FullscreenDenied,

    /// Media handle reported a load/decode failure
    #[error("Media unplayable: {0}")]
    Unplayable(String),

    /// Controller was closed and no longer accepts sources
    #[error("Player closed")]
    Closed,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
