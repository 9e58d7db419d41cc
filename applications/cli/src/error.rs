/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Session(#[from] animagery_core::AnimageryError),

    #[error("Playback error: {0}")]
    Playback(#[from] animagery_playback::PlaybackError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] animagery_catalog::CatalogError),

    #[error("Title not found: {0}")]
    TitleNotFound(String),

    #[error("Episode {episode} not found in {title}")]
    EpisodeNotFound { title: String, episode: String },
}

impl From<animagery_storage::StorageError> for CliError {
    fn from(err: animagery_storage::StorageError) -> Self {
        CliError::Session(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
