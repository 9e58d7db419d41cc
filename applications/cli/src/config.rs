/// Application configuration
use crate::error::{CliError, Result};
use animagery_catalog::{CatalogConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use animagery_playback::{IntroWindow, PlayerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "animagery.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    #[serde(default = "default_controls_hide_ms")]
    pub controls_hide_ms: u64,

    #[serde(default = "default_seek_step_secs")]
    pub seek_step_secs: f64,

    #[serde(default = "default_intro_start_secs")]
    pub intro_start_secs: f64,

    #[serde(default = "default_intro_end_secs")]
    pub intro_end_secs: f64,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Uses `path` when given (it must exist), otherwise `animagery.toml` in
    /// the working directory if present. `ANIMAGERY_*` variables override
    /// the file, with `__` between section and key
    /// (`ANIMAGERY_CATALOG__API_KEY`). A bare `API_KEY` is honored when no
    /// catalog key is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ANIMAGERY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: AppConfig = settings.build()?.try_deserialize()?;

        if config.catalog.api_key.is_none() {
            config.catalog.api_key = std::env::var("API_KEY").ok();
        }
        config.catalog.api_key = config
            .catalog
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty());

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.intro_end_secs <= self.player.intro_start_secs {
            return Err(CliError::Config(format!(
                "Intro window ends ({}) before it starts ({})",
                self.player.intro_end_secs, self.player.intro_start_secs
            )));
        }

        if self.player.intro_start_secs < 0.0 {
            return Err(CliError::Config(
                "Intro window cannot start before 0".to_string(),
            ));
        }

        if self.player.seek_step_secs <= 0.0 {
            return Err(CliError::Config(
                "Seek step must be positive".to_string(),
            ));
        }

        if !self.catalog.endpoint.starts_with("http://")
            && !self.catalog.endpoint.starts_with("https://")
        {
            return Err(CliError::Config(format!(
                "Catalog endpoint must be an http(s) URL, got {}",
                self.catalog.endpoint
            )));
        }

        Ok(())
    }

    /// Simulated latency for register/login
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth.latency_ms)
    }

    /// Settings for the catalog client
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            api_key: self.catalog.api_key.clone(),
            endpoint: self.catalog.endpoint.clone(),
            model: self.catalog.model.clone(),
            timeout: Duration::from_secs(self.catalog.timeout_secs),
        }
    }

    /// Settings for the player controller
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            autoplay: self.player.autoplay,
            controls_hide_ms: self.player.controls_hide_ms,
            seek_step_secs: self.player.seek_step_secs,
            intro: IntroWindow {
                start_secs: self.player.intro_start_secs,
                end_secs: self.player.intro_end_secs,
            },
            ..PlayerConfig::default()
        }
    }
}

// Default values
fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/animagery.json")
}

fn default_latency_ms() -> u64 {
    800
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_autoplay() -> bool {
    true
}

fn default_controls_hide_ms() -> u64 {
    3000
}

fn default_seek_step_secs() -> f64 {
    10.0
}

fn default_intro_start_secs() -> f64 {
    60.0
}

fn default_intro_end_secs() -> f64 {
    150.0
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            controls_hide_ms: default_controls_hide_ms(),
            seek_step_secs: default_seek_step_secs(),
            intro_start_secs: default_intro_start_secs(),
            intro_end_secs: default_intro_end_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_player_behavior() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth_latency(), Duration::from_millis(800));
        assert_eq!(config.storage.path, PathBuf::from("./data/animagery.json"));

        let player = config.player_config();
        assert!(player.autoplay);
        assert_eq!(player.controls_hide_ms, 3000);
        assert_eq!(player.intro, IntroWindow::default());

        let catalog = config.catalog_config();
        assert_eq!(catalog.model, "gemini-2.5-flash");
        assert_eq!(catalog.timeout, Duration::from_secs(30));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [storage]
            path = "/tmp/animagery-test.json"

            [auth]
            latency_ms = 0

            [player]
            autoplay = false
            intro_start_secs = 30.0
            intro_end_secs = 90.0
            "#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/animagery-test.json"));
        assert_eq!(config.auth_latency(), Duration::ZERO);
        assert!(!config.player.autoplay);
        assert_eq!(config.player_config().intro.end_secs, 90.0);
        // Untouched sections keep their defaults
        assert_eq!(config.player.seek_step_secs, 10.0);
        assert_eq!(config.catalog.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn inverted_intro_window_rejected() {
        let mut config = AppConfig::default();
        config.player.intro_start_secs = 150.0;
        config.player.intro_end_secs = 60.0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        config.player.intro_end_secs = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let mut config = AppConfig::default();
        config.catalog.endpoint = "generativelanguage.googleapis.com".to_string();
        assert!(config.validate().is_err());
    }
}
