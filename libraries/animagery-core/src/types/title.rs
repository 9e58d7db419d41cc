/// Catalog domain types
use serde::{Deserialize, Serialize};

/// Duration label given to synthesized episodes
const PLACEHOLDER_EPISODE_DURATION: &str = "24m";

/// An anime series in the catalog
///
/// Produced by the catalog collaborator (or the fallback catalog) and treated
/// as immutable value data everywhere else. Field names serialize in
/// camelCase, which is both the collaborator's JSON shape and the persisted
/// layout of saved lists and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    /// Catalog identifier (unique within a catalog response)
    pub id: String,

    /// Display name
    pub title: String,

    /// Short synopsis
    pub description: String,

    /// Portrait artwork
    #[serde(default)]
    pub thumbnail_url: String,

    /// Wide banner artwork
    #[serde(default)]
    pub cover_url: String,

    /// Genre tags
    #[serde(default)]
    pub genres: Vec<String>,

    /// Rating on a 1-10 scale
    #[serde(default)]
    pub rating: f32,

    /// Release year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,

    /// Number of episodes
    #[serde(default)]
    pub episodes: u32,

    /// Available audio languages (e.g. "Japanese", "English")
    #[serde(default)]
    pub available_languages: Vec<String>,

    /// Concrete episodes, when the catalog provides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_list: Option<Vec<Episode>>,
}

/// A single episode of a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Episode identifier
    pub id: String,

    /// Episode number within its season
    pub number: u32,

    /// Season the episode belongs to
    pub season: u32,

    /// Episode title
    pub title: String,

    /// Short synopsis
    #[serde(default)]
    pub description: String,

    /// Still artwork
    #[serde(default)]
    pub thumbnail_url: String,

    /// Media locator handed to the player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Human readable duration (e.g. "24m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A named rail of titles on the home screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Rail heading
    pub title: String,

    /// Titles in display order
    pub items: Vec<Title>,
}

impl Title {
    /// Create a title with only an id and display name
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            thumbnail_url: String::new(),
            cover_url: String::new(),
            genres: Vec::new(),
            rating: 0.0,
            release_year: None,
            episodes: 0,
            available_languages: Vec::new(),
            episode_list: None,
        }
    }

    /// Episodes to present for this title
    ///
    /// Uses the concrete episode list when present; otherwise synthesizes
    /// `episodes` placeholder entries in season 1.
    pub fn episodes_or_placeholder(&self) -> Vec<Episode> {
        if let Some(list) = &self.episode_list {
            return list.clone();
        }

        (0..self.episodes)
            .map(|i| Episode {
                id: format!("mock-{}", i),
                number: i + 1,
                season: 1,
                title: format!("Episode {}", i + 1),
                description: if i == 0 {
                    "The journey begins as our heroes meet for the first time.".to_string()
                } else {
                    "Tensions rise as the group faces a new, unexpected threat.".to_string()
                },
                thumbnail_url: format!("https://picsum.photos/seed/{}-{}/300/200", self.id, i),
                video_url: None,
                duration: Some(PLACEHOLDER_EPISODE_DURATION.to_string()),
            })
            .collect()
    }

    /// Distinct season numbers, ascending
    pub fn seasons(&self) -> Vec<u32> {
        let mut seasons: Vec<u32> = self
            .episodes_or_placeholder()
            .iter()
            .map(|e| e.season)
            .collect();
        seasons.sort_unstable();
        seasons.dedup();
        seasons
    }

    /// Episodes of one season, in catalog order
    pub fn episodes_in_season(&self, season: u32) -> Vec<Episode> {
        self.episodes_or_placeholder()
            .into_iter()
            .filter(|e| e.season == season)
            .collect()
    }
}
