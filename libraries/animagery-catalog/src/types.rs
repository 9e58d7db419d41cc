//! Types for the catalog collaborator's `generateContent` API.

use animagery_core::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default collaborator endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for connecting to the collaborator.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API key; without one every request fails with `MissingApiKey`
    pub api_key: Option<String>,
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    pub endpoint: String,
    /// Model name placed in the request path
    pub model: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Default endpoint and model with the given key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Point at a different endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// One structured-output request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// User prompt
    pub prompt: String,
    /// JSON schema the response must follow
    pub schema: Value,
    /// Optional persona
    pub system_instruction: Option<String>,
}

/// Parsed home response.
#[derive(Debug, Deserialize)]
pub(crate) struct HomeResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentBody {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentBody {
    pub(crate) fn from_request(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: Some(text.clone()),
                }],
            }),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.schema.clone(),
            },
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub(crate) fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_uses_camel_case_wire_names() {
        let request = GenerationRequest {
            prompt: "hi".to_string(),
            schema: json!({ "type": "ARRAY" }),
            system_instruction: Some("curator".to_string()),
        };

        let body = serde_json::to_value(GenerateContentBody::from_request(&request)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "curator");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn response_text_extraction() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
        }))
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("[]"));

        let empty: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(empty.into_text().is_none());

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        }))
        .unwrap();
        assert!(blank.into_text().is_none());
    }
}
