//! Tests for the catalog client against a mock collaborator.
//!
//! These use wiremock so the full HTTP round trip is exercised without
//! a real API key.

use animagery_catalog::{
    fallback_catalog, CatalogConfig, CatalogError, CatalogProvider, CatalogService, GeminiClient,
    GenerationRequest,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client_for(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
    let config = CatalogConfig::new(api_key.map(str::to_string)).with_endpoint(server.uri());
    GeminiClient::new(config).unwrap()
}

/// Wrap generated text the way the service does
fn generated(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
}

fn home_text() -> String {
    json!({
        "categories": [
            {
                "title": "Trending Now",
                "items": [{
                    "id": "101",
                    "title": "Neon Ronin",
                    "description": "A courier runs data through a drowned city. Nobody trusts the tide.",
                    "genres": ["Cyberpunk", "Action"],
                    "rating": 8.7,
                    "releaseYear": 2023,
                    "availableLanguages": ["Japanese", "English"],
                    "episodes": 24
                }]
            },
            {
                "title": "Slice of Life",
                "items": [{
                    "id": "202",
                    "title": "Tea at Dusk",
                    "description": "Two friends run a cafe. The regulars have secrets.",
                    "genres": ["Slice of Life"],
                    "rating": 7.9,
                    "availableLanguages": ["Japanese"]
                }]
            }
        ]
    })
    .to_string()
}

// =============================================================================
// Client
// =============================================================================

mod client {
    use super::*;

    #[tokio::test]
    async fn test_generate_posts_structured_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" },
                "systemInstruction": { "parts": [{ "text": "curator" }] }
            })))
            .respond_with(generated("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let text = client
            .generate(GenerationRequest {
                prompt: "hello".into(),
                schema: json!({ "type": "OBJECT" }),
                system_instruction: Some("curator".into()),
            })
            .await
            .unwrap();

        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("bad"));
        let err = client
            .generate(GenerationRequest {
                prompt: "p".into(),
                schema: json!({}),
                system_instruction: None,
            })
            .await
            .unwrap_err();

        match err {
            CatalogError::ServerError { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("not valid"));
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("k"));
        let err = client
            .generate(GenerationRequest {
                prompt: "p".into(),
                schema: json!({}),
                system_instruction: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::EmptyResponse));
    }
}

// =============================================================================
// Service
// =============================================================================

mod service {
    use super::*;

    #[tokio::test]
    async fn test_home_returns_enriched_categories() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(generated(&home_text()))
            .mount(&server)
            .await;

        let service = CatalogService::new(client_for(&server, Some("k")));
        let categories = service.home().await;

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].title, "Trending Now");

        let neon = &categories[0].items[0];
        assert_eq!(neon.title, "Neon Ronin");
        assert_eq!(neon.release_year, Some(2023));
        assert_eq!(neon.thumbnail_url, "https://picsum.photos/seed/101/400/600");
        assert_eq!(neon.cover_url, "https://picsum.photos/seed/101-wide/1200/600");

        // Optional fields default when the collaborator omits them
        let tea = &categories[1].items[0];
        assert_eq!(tea.episodes, 0);
        assert_eq!(tea.release_year, None);
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_without_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(generated(&home_text()))
            .expect(0)
            .mount(&server)
            .await;

        let service = CatalogService::new(client_for(&server, None));
        assert_eq!(service.home().await, fallback_catalog());
        assert!(service.search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = CatalogService::new(client_for(&server, Some("k")));
        let categories = service.home().await;

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].title, "Trending Now (Offline Mode)");
        assert_eq!(categories[0].items.len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_text_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(generated("{\"categories\": [ {\"title\": "))
            .mount(&server)
            .await;

        let service = CatalogService::new(client_for(&server, Some("k")));
        assert_eq!(service.home().await, fallback_catalog());
    }

    #[tokio::test]
    async fn test_search_returns_titles() {
        let server = MockServer::start().await;
        let text = json!([
            { "id": "s1", "title": "Star Courier", "description": "d", "genres": ["Space"],
              "rating": 8.0, "availableLanguages": ["Japanese"] },
            { "id": "s2", "title": "Orbit Kids", "description": "d", "genres": ["Space"],
              "rating": 7.2, "availableLanguages": ["English"] }
        ])
        .to_string();

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": { "responseSchema": { "type": "ARRAY" } }
            })))
            .respond_with(generated(&text))
            .expect(1)
            .mount(&server)
            .await;

        let service = CatalogService::new(client_for(&server, Some("k")));
        let titles = service.search("space").await;

        let ids: Vec<_> = titles.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2"]);
        assert!(titles.iter().all(|t| t.thumbnail_url.contains("picsum.photos")));
    }

    #[tokio::test]
    async fn test_search_failure_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = CatalogService::new(client_for(&server, Some("k")));
        assert!(service.search("space").await.is_empty());
    }
}
