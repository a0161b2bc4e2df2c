//! Tag entity - short labels for categorizing prompts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::generate_nano_id;

/// A tag. Names are unique and case-sensitive; rows are created on first
/// reference and never updated or deleted by the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Primary key - nano ID.
    pub id: String,

    /// Tag name (unique).
    pub name: String,
}

impl Tag {
    /// Create a new tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_nano_id(),
            name: name.into(),
        }
    }
}
