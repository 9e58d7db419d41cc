//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when asking the content collaborator for titles.
///
/// None of these reach the UI: [`CatalogService`](crate::CatalogService)
/// collapses every variant into the fallback catalog or an empty result.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No API key configured
    #[error("No API key configured for the catalog service")]
    MissingApiKey,

    /// Endpoint could not be turned into a request URL
    #[error("Invalid catalog endpoint: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Catalog service error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Response carried no generated text
    #[error("Catalog service returned no content")]
    EmptyResponse,

    /// Generated text was not the JSON shape we asked for
    #[error("Failed to parse catalog response: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::ParseError(err.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
