/// Shared application state for CLI commands
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use animagery_catalog::{CatalogProvider, CatalogService, GeminiClient};
use animagery_core::{format_time, KeyValueStore, Title, UserProfile};
use animagery_storage::{JsonFileStore, SessionStore};
use tracing::debug;

pub struct App<S: KeyValueStore, P: CatalogProvider> {
    pub config: AppConfig,
    pub session: SessionStore<S>,
    pub catalog: CatalogService<P>,
}

impl App<JsonFileStore, GeminiClient> {
    /// Open the configured store and restore the last session
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let store = JsonFileStore::open(&config.storage.path)?;
        let session = SessionStore::restore(store)?.with_latency(config.auth_latency());
        let catalog = CatalogService::new(GeminiClient::new(config.catalog_config())?);

        debug!(path = %config.storage.path.display(), "Application state ready");

        Ok(Self {
            config,
            session,
            catalog,
        })
    }
}

impl<S: KeyValueStore, P: CatalogProvider> App<S, P> {
    pub fn new(config: AppConfig, session: SessionStore<S>, catalog: CatalogService<P>) -> Self {
        Self {
            config,
            session,
            catalog,
        }
    }

    /// Find a title by id
    ///
    /// Looks in the signed-in user's list and history before asking the
    /// catalog, so saved titles resolve offline.
    pub async fn resolve_title(&self, id: &str) -> Result<Title> {
        if let Some(profile) = self.session.current() {
            let saved = profile
                .my_list
                .iter()
                .chain(profile.history.iter())
                .find(|t| t.id == id);
            if let Some(title) = saved {
                return Ok(title.clone());
            }
        }

        self.catalog
            .home()
            .await
            .into_iter()
            .flat_map(|category| category.items)
            .find(|t| t.id == id)
            .ok_or_else(|| CliError::TitleNotFound(id.to_string()))
    }
}

/// One-line summary of a title
pub fn describe_title(title: &Title) -> String {
    let mut line = format!("{:<12} {}", title.id, title.title);
    if let Some(year) = title.release_year {
        line.push_str(&format!(" ({})", year));
    }
    if title.rating > 0.0 {
        line.push_str(&format!("  ★ {:.1}", title.rating));
    }
    if !title.genres.is_empty() {
        line.push_str(&format!("  [{}]", title.genres.join(", ")));
    }
    line
}

/// Multi-line summary of a profile
pub fn describe_profile(profile: &UserProfile) -> String {
    format!(
        "{} <{}>\n  id:      {}\n  avatar:  {} {}\n  list:    {} titles\n  history: {} titles",
        profile.username,
        profile.email,
        profile.id,
        profile.initials(),
        profile.avatar_color,
        profile.my_list.len(),
        profile.history.len()
    )
}

/// `position / duration` readout
pub fn describe_position(position_secs: f64, duration_secs: f64) -> String {
    format!("{} / {}", format_time(position_secs), format_time(duration_secs))
}
