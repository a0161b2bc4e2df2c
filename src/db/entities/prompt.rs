//! Prompt entity and its version history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::generate_nano_id;
use super::tag::Tag;

/// Prompt - main prompt storage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prompt {
    /// Primary key - nano ID (21 chars).
    pub id: String,

    /// Display title, stored sanitized (trimmed, single spaces, title case).
    pub title: String,

    /// The prompt text.
    pub content: String,

    /// Version label in `"<major>.<minor>"` form.
    pub version: String,

    /// Target model identifier, e.g. "gpt-4".
    pub model_type: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    /// Create a new prompt with defaults. Every prompt starts at version 1.0.
    pub fn new(
        title: impl Into<String>,
        model_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_nano_id(),
            title: title.into(),
            content: content.into(),
            version: "1.0".to_string(),
            model_type: model_type.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// PromptVersion - append-only content snapshot, written immediately before a
/// content-changing update. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PromptVersion {
    /// Primary key - nano ID.
    pub id: String,

    /// Parent prompt ID.
    pub prompt_id: String,

    /// Content at snapshot time.
    pub content: String,

    /// Version label at snapshot time.
    pub version: String,

    pub created_at: DateTime<Utc>,
}

impl PromptVersion {
    /// Snapshot the current state of a prompt, stamped now.
    pub fn snapshot(prompt: &Prompt) -> Self {
        Self {
            id: generate_nano_id(),
            prompt_id: prompt.id.clone(),
            content: prompt.content.clone(),
            version: prompt.version.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Update parameters applied to a prompt row.
#[derive(Debug, Clone)]
pub struct UpdatePrompt {
    pub title: String,
    pub content: String,
    pub model_type: String,
    pub version: String,
    pub updated_at: DateTime<Utc>,
}

/// A prompt together with its eagerly loaded tags.
#[derive(Debug, Clone, Serialize)]
pub struct PromptWithTags {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub tags: Vec<Tag>,
}
