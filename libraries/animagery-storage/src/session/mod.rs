//! Session store
//!
//! Owns the mapping from the active session to a user profile and keeps
//! every registered account in one serialized array under
//! [`STORAGE_KEY_USERS`]. The active profile's id lives under
//! [`STORAGE_KEY_CURRENT`]; its absence means logged out.
//!
//! Credentials are stored and compared in plaintext. This is a local
//! account simulation, not an authentication system.

use animagery_core::{
    AnimageryError, AvatarColor, KeyValueStore, Result, StoredAccount, Title, UserProfile,
};
use std::time::Duration;

/// Key holding the JSON array of all accounts
pub const STORAGE_KEY_USERS: &str = "animagery_users";

/// Key holding the active profile id
pub const STORAGE_KEY_CURRENT: &str = "animagery_current_user_id";

/// Artificial delay applied to register and login
pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(800);

/// Registration, login, saved list and watch history over a key-value store
///
/// The active session is an explicit field rather than ambient state.
/// `register` and `login` borrow the store mutably across their simulated
/// latency, so only one of them can be pending at a time; dropping the
/// returned future cancels it without touching the store.
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    active: Option<UserProfile>,
    latency: Duration,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a logged-out session over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            active: None,
            latency: DEFAULT_AUTH_LATENCY,
        }
    }

    /// Reconstruct the session from whatever `store` holds
    ///
    /// A stored active id that matches no account is treated as logged out.
    pub fn restore(store: S) -> Result<Self> {
        let mut session = Self::new(store);

        if let Some(id) = session.store.get(STORAGE_KEY_CURRENT)? {
            let accounts = session.load_accounts()?;
            match accounts.into_iter().find(|a| a.profile.id.as_str() == id) {
                Some(account) => {
                    tracing::info!(user_id = %id, "Restored session");
                    session.active = Some(account.profile);
                }
                None => {
                    tracing::debug!(user_id = %id, "Stored session points at unknown account");
                }
            }
        }

        Ok(session)
    }

    /// Override the simulated auth latency
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The signed-in profile, if any
    pub fn current(&self) -> Option<&UserProfile> {
        self.active.as_ref()
    }

    /// Whether a session is active
    pub fn is_authenticated(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the active profile has saved `title_id`
    pub fn is_in_list(&self, title_id: &str) -> bool {
        self.active
            .as_ref()
            .is_some_and(|p| p.is_in_list(title_id))
    }

    /// Every registered profile, secrets stripped
    pub fn accounts(&self) -> Result<Vec<UserProfile>> {
        Ok(self
            .load_accounts()?
            .into_iter()
            .map(|a| a.profile)
            .collect())
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Create an account and sign it in
    ///
    /// Fails with [`AnimageryError::DuplicateEmail`] if the email is taken,
    /// in which case nothing is written.
    pub async fn register(
        &mut self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<UserProfile> {
        tokio::time::sleep(self.latency).await;

        let mut accounts = self.load_accounts()?;
        if accounts.iter().any(|a| a.profile.email == email) {
            tracing::debug!(email, "Registration rejected: email in use");
            return Err(AnimageryError::DuplicateEmail(email.to_string()));
        }

        let profile = UserProfile::new(email, username, AvatarColor::random());
        accounts.push(StoredAccount::new(profile.clone(), password));
        self.save_accounts(&accounts)?;
        self.activate(profile.clone())?;

        tracing::info!(user_id = %profile.id, username, "Registered account");
        Ok(profile)
    }

    /// Sign in with an exact email and secret match
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        tokio::time::sleep(self.latency).await;

        let account = self
            .load_accounts()?
            .into_iter()
            .find(|a| a.matches(email, password))
            .ok_or(AnimageryError::InvalidCredentials)?;

        let profile = account.profile;
        self.activate(profile.clone())?;

        tracing::info!(user_id = %profile.id, "Logged in");
        Ok(profile)
    }

    /// Clear the active session
    ///
    /// Never fails; a store that refuses the removal is logged and the
    /// in-memory session is cleared regardless.
    pub fn logout(&mut self) {
        if let Some(profile) = self.active.take() {
            tracing::info!(user_id = %profile.id, "Logged out");
        }
        if let Err(e) = self.store.remove(STORAGE_KEY_CURRENT) {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }

    /// Save a title at the front of the active profile's list
    ///
    /// Fails with [`AnimageryError::AuthenticationRequired`] when signed out.
    /// Saving an already saved title changes nothing.
    pub fn add_to_list(&mut self, title: Title) -> Result<()> {
        let mut profile = self
            .active
            .clone()
            .ok_or(AnimageryError::AuthenticationRequired)?;

        let title_id = title.id.clone();
        if profile.add_to_list(title) {
            self.commit(profile)?;
            tracing::debug!(title_id = %title_id, "Added to list");
        }
        Ok(())
    }

    /// Remove a title from the active profile's list
    ///
    /// No-op when signed out or when the title is not saved.
    pub fn remove_from_list(&mut self, title_id: &str) -> Result<()> {
        let Some(mut profile) = self.active.clone() else {
            return Ok(());
        };

        if profile.remove_from_list(title_id) {
            self.commit(profile)?;
            tracing::debug!(title_id, "Removed from list");
        }
        Ok(())
    }

    /// Put a title at the front of the active profile's watch history
    ///
    /// No-op when signed out.
    pub fn record_watched(&mut self, title: Title) -> Result<()> {
        let Some(mut profile) = self.active.clone() else {
            return Ok(());
        };

        let title_id = title.id.clone();
        profile.record_watched(title);
        self.commit(profile)?;
        tracing::debug!(title_id = %title_id, "Recorded watch");
        Ok(())
    }

    fn activate(&mut self, profile: UserProfile) -> Result<()> {
        self.store.set(STORAGE_KEY_CURRENT, profile.id.as_str())?;
        self.active = Some(profile);
        Ok(())
    }

    fn load_accounts(&self) -> Result<Vec<StoredAccount>> {
        match self.store.get(STORAGE_KEY_USERS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_accounts(&mut self, accounts: &[StoredAccount]) -> Result<()> {
        let raw = serde_json::to_string(accounts)?;
        self.store.set(STORAGE_KEY_USERS, &raw)
    }

    /// Persist `profile` in place of its stored copy, then make it active
    ///
    /// The stored secret is carried over untouched. On a failed write the
    /// active profile keeps its previous state.
    fn commit(&mut self, profile: UserProfile) -> Result<()> {
        let mut accounts = self.load_accounts()?;
        for account in &mut accounts {
            if account.profile.id == profile.id {
                account.profile = profile.clone();
            }
        }
        self.save_accounts(&accounts)?;
        self.active = Some(profile);
        Ok(())
    }
}
