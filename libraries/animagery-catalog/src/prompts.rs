//! Prompts and response schemas sent to the content collaborator.

use serde_json::{json, Value};

/// Persona given to the collaborator for home-screen curation.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a specialized content curator for a high-end anime streaming platform.";

/// Request for the home-screen rails.
pub const HOME_PROMPT: &str = r#"
Generate a JSON object containing curated lists of anime for a streaming app.
Focus on 4 distinct categories: "Trending Now", "Cult Classics", "Cyberpunk Futures", and "Slice of Life".
Each category should have 4-6 anime titles.
For each anime, provide:
- A unique numeric ID (string).
- Catchy title.
- A sophisticated 2-sentence description.
- A list of available dub languages (e.g., "Japanese", "English", "German", "Spanish").
- Genre tags.
- Release year.
- Episode count.
- Rating (1-10).
Ensure the tone is professional.
"#;

/// Request for titles matching a free-text query.
pub fn search_prompt(query: &str) -> String {
    format!(
        "\nSearch for anime matching the query: \"{}\".\n\
         Return a list of 6-8 fictional or real anime titles that fit the search.\n\
         Format as a JSON array of anime objects matching the structure used previously.\n",
        query
    )
}

/// Schema of a single title object.
pub fn title_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "genres": { "type": "ARRAY", "items": { "type": "STRING" } },
            "rating": { "type": "NUMBER" },
            "releaseYear": { "type": "INTEGER" },
            "availableLanguages": { "type": "ARRAY", "items": { "type": "STRING" } },
            "episodes": { "type": "INTEGER" }
        },
        "required": ["id", "title", "description", "genres", "rating", "availableLanguages"]
    })
}

/// Schema of the home response: `{ "categories": [{ "title", "items" }] }`.
pub fn home_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "categories": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "items": { "type": "ARRAY", "items": title_schema() }
                    },
                    "required": ["title", "items"]
                }
            }
        }
    })
}

/// Schema of the search response: a bare array of titles.
pub fn search_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": title_schema()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_prompt_quotes_query() {
        let prompt = search_prompt("mecha");
        assert!(prompt.contains("\"mecha\""));
        assert!(prompt.contains("6-8"));
    }

    #[test]
    fn home_schema_nests_title_schema() {
        let schema = home_schema();
        let items = &schema["properties"]["categories"]["items"]["properties"]["items"]["items"];
        assert_eq!(items, &title_schema());
        assert_eq!(search_schema()["items"], title_schema());
    }

    #[test]
    fn home_prompt_names_categories() {
        for name in ["Trending Now", "Cult Classics", "Cyberpunk Futures", "Slice of Life"] {
            assert!(HOME_PROMPT.contains(name));
        }
    }
}
