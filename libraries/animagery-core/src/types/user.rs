/// User profile and stored account types
use super::ids::UserId;
use super::title::Title;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of titles kept in a watch history
pub const HISTORY_LIMIT: usize = 20;

/// Avatar background color, assigned once at registration
///
/// Persisted as its hex code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AvatarColor {
    /// `#ef4444`
    Red,
    /// `#f97316`
    Orange,
    /// `#84cc16`
    Lime,
    /// `#06b6d4`
    Cyan,
    /// `#8b5cf6`
    Violet,
    /// `#d946ef`
    Fuchsia,
}

impl AvatarColor {
    /// The full palette, in registration order
    pub const ALL: [AvatarColor; 6] = [
        AvatarColor::Red,
        AvatarColor::Orange,
        AvatarColor::Lime,
        AvatarColor::Cyan,
        AvatarColor::Violet,
        AvatarColor::Fuchsia,
    ];

    /// Pick a palette entry uniformly at random
    pub fn random() -> Self {
        use rand::seq::SliceRandom;

        *Self::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&AvatarColor::Red)
    }

    /// CSS hex code
    pub fn hex(self) -> &'static str {
        match self {
            AvatarColor::Red => "#ef4444",
            AvatarColor::Orange => "#f97316",
            AvatarColor::Lime => "#84cc16",
            AvatarColor::Cyan => "#06b6d4",
            AvatarColor::Violet => "#8b5cf6",
            AvatarColor::Fuchsia => "#d946ef",
        }
    }
}

impl TryFrom<String> for AvatarColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(&value))
            .ok_or_else(|| format!("unknown avatar color: {}", value))
    }
}

impl From<AvatarColor> for String {
    fn from(color: AvatarColor) -> Self {
        color.hex().to_string()
    }
}

impl fmt::Display for AvatarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// A user profile as seen by the rest of the application
///
/// Never carries the account secret. `my_list` and `history` are ordered
/// most-recent first and never contain two titles with the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Opaque identifier
    pub id: UserId,

    /// Unique lookup key
    pub email: String,

    /// Display name
    pub username: String,

    /// Saved titles, most recently added first
    #[serde(default)]
    pub my_list: Vec<Title>,

    /// Watch history, most recently watched first
    #[serde(default)]
    pub history: Vec<Title>,

    /// Avatar background
    pub avatar_color: AvatarColor,
}

impl UserProfile {
    /// Create an empty profile with a fresh id
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        avatar_color: AvatarColor,
    ) -> Self {
        Self {
            id: UserId::generate(),
            email: email.into(),
            username: username.into(),
            my_list: Vec::new(),
            history: Vec::new(),
            avatar_color,
        }
    }

    /// Whether a title is in the saved list
    pub fn is_in_list(&self, title_id: &str) -> bool {
        self.my_list.iter().any(|t| t.id == title_id)
    }

    /// Save a title at the front of the list
    ///
    /// Returns `false` (and leaves the list untouched) if the title is
    /// already saved.
    pub fn add_to_list(&mut self, title: Title) -> bool {
        if self.is_in_list(&title.id) {
            return false;
        }
        self.my_list.insert(0, title);
        true
    }

    /// Remove a saved title
    ///
    /// Returns whether anything was removed.
    pub fn remove_from_list(&mut self, title_id: &str) -> bool {
        let before = self.my_list.len();
        self.my_list.retain(|t| t.id != title_id);
        self.my_list.len() != before
    }

    /// Move (or insert) a title to the front of the history
    ///
    /// Drops the oldest entries beyond [`HISTORY_LIMIT`].
    pub fn record_watched(&mut self, title: Title) {
        self.history.retain(|t| t.id != title.id);
        self.history.insert(0, title);
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Up to two uppercase characters of the username, for the avatar badge
    pub fn initials(&self) -> String {
        self.username.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// A profile together with its credential, as persisted
///
/// Only the storage layer handles this type; callers receive the
/// [`UserProfile`] half.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAccount {
    /// Public half of the account
    #[serde(flatten)]
    pub profile: UserProfile,

    /// Plaintext secret, compared byte-for-byte at login
    pub password: String,
}

impl StoredAccount {
    /// Pair a profile with its secret
    pub fn new(profile: UserProfile, password: impl Into<String>) -> Self {
        Self {
            profile,
            password: password.into(),
        }
    }

    /// Exact email and secret match
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.profile.email == email && self.password == password
    }
}
