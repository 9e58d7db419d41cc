//! Home rails and search with an offline fallback.

use crate::artwork;
use crate::client::CatalogProvider;
use crate::error::Result;
use crate::prompts;
use crate::types::{GenerationRequest, HomeResponse};
use animagery_core::{Category, Title};
use tracing::{info, warn};

/// Heading of the offline rail.
pub const FALLBACK_CATEGORY: &str = "Trending Now (Offline Mode)";

/// Catalog front door used by the UI.
///
/// Never fails: home content degrades to [`fallback_catalog`] and search
/// degrades to an empty list. Failures are logged, not surfaced.
pub struct CatalogService<P: CatalogProvider> {
    provider: P,
}

impl<P: CatalogProvider> CatalogService<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Categories for the home screen.
    pub async fn home(&self) -> Vec<Category> {
        match self.fetch_home().await {
            Ok(categories) if !categories.is_empty() => {
                info!(categories = categories.len(), "Loaded home catalog");
                categories
            }
            Ok(_) => {
                warn!("Catalog service returned no categories, using offline catalog");
                fallback_catalog()
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, using offline catalog");
                fallback_catalog()
            }
        }
    }

    /// Titles matching a free-text query.
    pub async fn search(&self, query: &str) -> Vec<Title> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.fetch_search(query).await {
            Ok(titles) => {
                info!(query = %query, results = titles.len(), "Search completed");
                titles
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    async fn fetch_home(&self) -> Result<Vec<Category>> {
        let text = self
            .provider
            .generate(GenerationRequest {
                prompt: prompts::HOME_PROMPT.to_string(),
                schema: prompts::home_schema(),
                system_instruction: Some(prompts::SYSTEM_INSTRUCTION.to_string()),
            })
            .await?;

        let response: HomeResponse = serde_json::from_str(&text)?;
        Ok(response
            .categories
            .into_iter()
            .map(|category| Category {
                title: category.title,
                items: category.items.into_iter().map(artwork::enrich).collect(),
            })
            .collect())
    }

    async fn fetch_search(&self, query: &str) -> Result<Vec<Title>> {
        let text = self
            .provider
            .generate(GenerationRequest {
                prompt: prompts::search_prompt(query),
                schema: prompts::search_schema(),
                system_instruction: None,
            })
            .await?;

        let titles: Vec<Title> = serde_json::from_str(&text)?;
        Ok(titles.into_iter().map(artwork::enrich).collect())
    }
}

/// The single offline rail shown when the collaborator is unavailable.
pub fn fallback_catalog() -> Vec<Category> {
    let items = (1..=4)
        .map(|n| {
            artwork::enrich(Title {
                description:
                    "An engaging story about persistence and dreams in a fantastical world."
                        .to_string(),
                genres: vec!["Action".to_string(), "Fantasy".to_string()],
                rating: 8.5,
                release_year: Some(2024),
                available_languages: vec!["JP".to_string(), "EN".to_string()],
                episodes: 12,
                ..Title::new(format!("offline-{}", n), format!("Anime Sample {}", n))
            })
        })
        .collect();

    vec![Category {
        title: FALLBACK_CATEGORY.to_string(),
        items,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCatalogProvider;
    use crate::error::CatalogError;

    fn service_returning(text: &'static str) -> CatalogService<MockCatalogProvider> {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_generate()
            .returning(move |_| Ok(text.to_string()));
        CatalogService::new(provider)
    }

    #[test]
    fn fallback_shape() {
        let categories = fallback_catalog();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].title, FALLBACK_CATEGORY);

        let ids: Vec<_> = categories[0].items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["offline-1", "offline-2", "offline-3", "offline-4"]);

        let first = &categories[0].items[0];
        assert_eq!(first.title, "Anime Sample 1");
        assert_eq!(first.episodes, 12);
        assert_eq!(first.rating, 8.5);
        assert_eq!(first.thumbnail_url, artwork::thumbnail_url("offline-1"));
    }

    #[tokio::test]
    async fn home_uses_provider_categories() {
        let service = service_returning(
            r#"{"categories":[{"title":"Cult Classics","items":[
                {"id":"1","title":"Lain","description":"d","genres":["Psychological"],
                 "rating":9.1,"availableLanguages":["Japanese"]}]}]}"#,
        );

        let categories = service.home().await;
        assert_eq!(categories[0].title, "Cult Classics");
        assert_eq!(categories[0].items[0].cover_url, artwork::cover_url("1"));
    }

    #[tokio::test]
    async fn home_falls_back_on_malformed_json() {
        let service = service_returning("not json");
        assert_eq!(service.home().await, fallback_catalog());
    }

    #[tokio::test]
    async fn home_falls_back_on_zero_categories() {
        let service = service_returning(r#"{"categories":[]}"#);
        assert_eq!(service.home().await, fallback_catalog());
    }

    #[tokio::test]
    async fn home_falls_back_on_provider_error() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_generate()
            .returning(|_| Err(CatalogError::MissingApiKey));

        let service = CatalogService::new(provider);
        assert_eq!(service.home().await, fallback_catalog());
    }

    #[tokio::test]
    async fn search_sends_query_and_enriches() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_generate()
            .withf(|req| req.prompt.contains("\"space pirates\"") && req.system_instruction.is_none())
            .times(1)
            .returning(|_| Ok(r#"[{"id":"s1","title":"Outlaw Star","description":"d"}]"#.into()));

        let service = CatalogService::new(provider);
        let titles = service.search("  space pirates ").await;
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].thumbnail_url, artwork::thumbnail_url("s1"));
    }

    #[tokio::test]
    async fn blank_search_skips_provider() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_generate().times(0);

        let service = CatalogService::new(provider);
        assert!(service.search("   ").await.is_empty());
    }

    #[tokio::test]
    async fn search_failure_is_empty() {
        let service = service_returning(r#"{"not":"an array"}"#);
        assert!(service.search("x").await.is_empty());
    }
}
