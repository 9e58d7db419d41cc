//! Animagery Core
//!
//! Platform-agnostic domain types, traits, and error handling shared by the
//! Animagery libraries and applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Title`, `Episode`, `Category`, `UserProfile`, `StoredAccount`
//! - **Host Capabilities**: `KeyValueStore` (local persistence)
//! - **Error Handling**: Unified `AnimageryError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use animagery_core::types::{Title, UserProfile, AvatarColor};
//!
//! let title = Title::new("42", "Neon Ronin");
//! let mut profile = UserProfile::new("a@x.com", "Alice", AvatarColor::Cyan);
//!
//! profile.add_to_list(title.clone());
//! assert!(profile.is_in_list("42"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AnimageryError, Result};
pub use time::format_time;
pub use traits::KeyValueStore;

pub use types::{
    AvatarColor, Category, Episode, StoredAccount, Title, UserId, UserProfile,
    HISTORY_LIMIT,
};
