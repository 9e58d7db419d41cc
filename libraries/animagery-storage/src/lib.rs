//! Animagery Storage
//!
//! Local persistence for Animagery:
//! - [`KeyValueStore`](animagery_core::KeyValueStore) backends: in-memory
//!   ([`MemoryStore`]) and a JSON file on disk ([`JsonFileStore`])
//! - The [`SessionStore`]: registration, login, the saved-titles list and
//!   watch history, persisted as a flat key-value blob
//!
//! # Example
//!
//! ```rust
//! use animagery_core::Title;
//! use animagery_storage::{MemoryStore, SessionStore};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> animagery_core::Result<()> {
//! let mut session = SessionStore::new(MemoryStore::new()).with_latency(Duration::ZERO);
//!
//! session.register("a@x.com", "Alice", "pw").await?;
//! session.add_to_list(Title::new("42", "Neon Ronin"))?;
//!
//! assert!(session.is_in_list("42"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod kv;
pub mod session;

pub use error::{Result, StorageError};
pub use kv::{JsonFileStore, MemoryStore};
pub use session::{SessionStore, DEFAULT_AUTH_LATENCY, STORAGE_KEY_CURRENT, STORAGE_KEY_USERS};
