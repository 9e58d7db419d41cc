mod ids;
mod title;
mod user;

pub use ids::UserId;
pub use title::{Category, Episode, Title};
pub use user::{AvatarColor, StoredAccount, UserProfile, HISTORY_LIMIT};
