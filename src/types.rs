//! Request payloads for the HTTP surface.

use serde::Deserialize;

use crate::store::SearchFilter;

/// Body for POST /api/prompts.
#[derive(Debug, Deserialize)]
pub struct CreatePromptRequest {
    pub title: String,
    pub model_type: String,
    pub content: String,
    #[serde(default)]
    pub tag_names: Vec<String>,
}

/// Body for PUT /api/prompts/:id. Every field is submitted whole; the store
/// decides what actually changed.
#[derive(Debug, Deserialize)]
pub struct UpdatePromptRequest {
    pub title: String,
    pub model_type: String,
    pub content: String,
    #[serde(default)]
    pub tag_names: Vec<String>,
}

/// Query parameters for GET /api/prompts. `tags` is comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub model_type: Option<String>,
    pub text: Option<String>,
    pub tags: Option<String>,
}

impl SearchParams {
    pub fn into_filter(self) -> SearchFilter {
        let tag_names = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        SearchFilter {
            model_type: self.model_type,
            text: self.text,
            tag_names,
        }
    }
}
