//! Animagery Catalog Client
//!
//! Client library for the content collaborator that curates Animagery's
//! home rails and answers searches.
//!
//! # Features
//!
//! - **Home rails**: curated categories, with an offline rail when the
//!   collaborator is unreachable or has nothing to say
//! - **Search**: free-text title search, empty on failure
//! - **Artwork**: stable seeded images for titles that arrive without any
//!
//! # Example
//!
//! ```ignore
//! use animagery_catalog::{CatalogConfig, CatalogService, GeminiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CatalogConfig::new(std::env::var("API_KEY").ok());
//!     let service = CatalogService::new(GeminiClient::new(config)?);
//!
//!     for category in service.home().await {
//!         println!("{} ({} titles)", category.title, category.items.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod artwork;
mod client;
mod error;
pub mod prompts;
mod service;
mod types;

// Re-export main types
pub use client::{CatalogProvider, GeminiClient};
pub use error::{CatalogError, Result};
pub use service::{fallback_catalog, CatalogService, FALLBACK_CATEGORY};
pub use types::{CatalogConfig, GenerationRequest, DEFAULT_ENDPOINT, DEFAULT_MODEL};
