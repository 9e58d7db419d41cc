//! Animagery CLI Library
//!
//! Account, list and catalog commands plus headless watch sessions.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod watch;

// Re-export commonly used types for convenience
pub use commands::App;
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use watch::{SimulatedMedia, WatchSession};
