//! Prompt store - the business core.
//!
//! Owns the prompt lifecycle: validation, title sanitization, the
//! `major.minor` version-increment rule with history snapshots, tag
//! resolution, and filtered search. Everything here is a thin orchestration
//! over the repositories; each write operation commits as one transaction.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::entities::{Prompt, PromptVersion, PromptWithTags, Tag, UpdatePrompt};
use crate::db::repositories::{PromptRepository, TagRepository};
use crate::db::{DbError, DbResult};

/// Search criteria. All fields are optional and combine with logical AND;
/// `tag_names` matches prompts carrying at least one of the given tags.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub model_type: Option<String>,
    pub text: Option<String>,
    pub tag_names: Vec<String>,
}

/// The prompt store.
#[derive(Clone)]
pub struct PromptStore {
    prompts: PromptRepository,
    tags: TagRepository,
}

impl PromptStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            prompts: PromptRepository::new(pool.clone()),
            tags: TagRepository::new(pool),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a prompt at version 1.0 with the given tags.
    pub async fn create(
        &self,
        title: &str,
        model_type: &str,
        content: &str,
        tag_names: &[String],
    ) -> DbResult<PromptWithTags> {
        let title = require_field("title", title)?;
        let model_type = require_field("model_type", model_type)?;
        let content = require_field("content", content)?;

        let tags = self.tags.resolve_names(tag_names).await?;
        let tag_ids: Vec<String> = tags.iter().map(|t| t.id.clone()).collect();

        let prompt = Prompt::new(sanitize_title(&title), model_type, content);
        self.prompts.create(&prompt, &tag_ids).await?;

        Ok(PromptWithTags { prompt, tags })
    }

    /// Update a prompt, snapshotting the old content when it changed.
    ///
    /// The version label only moves on a content change: `major.minor` becomes
    /// `major.(minor+1)`, or resets to "1.1" when the stored label does not
    /// parse. Tag mappings are fully replaced and `updated_at` is stamped
    /// either way.
    pub async fn update(
        &self,
        id: &str,
        title: &str,
        model_type: &str,
        content: &str,
        tag_names: &[String],
    ) -> DbResult<PromptWithTags> {
        let title = require_field("title", title)?;
        let model_type = require_field("model_type", model_type)?;
        let content = require_field("content", content)?;

        let existing = self.prompts.find_by_id(id).await?.ok_or(DbError::NotFound)?;

        // Tag rows commit on their own; only the prompt writes below are
        // transactional.
        let tags = self.tags.resolve_names(tag_names).await?;
        let tag_ids: Vec<String> = tags.iter().map(|t| t.id.clone()).collect();

        let (snapshot, version) = if existing.content != content {
            (
                Some(PromptVersion::snapshot(&existing)),
                bump_version(&existing.version),
            )
        } else {
            (None, existing.version.clone())
        };

        let update = UpdatePrompt {
            title: sanitize_title(&title),
            content,
            model_type,
            version,
            updated_at: Utc::now(),
        };
        self.prompts
            .update(id, &update, snapshot.as_ref(), &tag_ids)
            .await?;

        let prompt = self.prompts.find_by_id(id).await?.ok_or(DbError::NotFound)?;
        Ok(PromptWithTags { prompt, tags })
    }

    /// Delete a prompt with its tag mappings and version snapshots. A missing
    /// id is a silent no-op, not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        self.prompts.delete(id).await?;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Search prompts. Model type and text narrow in SQL; the tag criterion is
    /// applied against the eagerly loaded tags.
    pub async fn search(&self, filter: &SearchFilter) -> DbResult<Vec<PromptWithTags>> {
        let model_type = filter.model_type.as_deref().filter(|s| !s.is_empty());
        let text = filter.text.as_deref().filter(|s| !s.is_empty());

        let prompts = self.prompts.search(model_type, text).await?;

        let mut results = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            let tags = self.prompts.tags_for(&prompt.id).await?;
            if !filter.tag_names.is_empty()
                && !tags.iter().any(|t| filter.tag_names.contains(&t.name))
            {
                continue;
            }
            results.push(PromptWithTags { prompt, tags });
        }

        Ok(results)
    }

    /// Version history for a prompt, newest first.
    pub async fn list_versions(&self, prompt_id: &str) -> DbResult<Vec<PromptVersion>> {
        self.prompts.list_versions(prompt_id).await
    }

    /// All known tags, for the filter UI.
    pub async fn list_tags(&self) -> DbResult<Vec<Tag>> {
        self.tags.find_all().await
    }
}

/// Trim a required field, rejecting empties.
fn require_field(name: &str, value: &str) -> DbResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DbError::Validation(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Sanitize a title: trim, collapse whitespace runs to single spaces, and
/// title-case each word.
pub fn sanitize_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Compute the next version label from the current one.
///
/// A well-formed `major.minor` label increments the minor component. Anything
/// else resets to "1.1" - a deliberate fallback for malformed legacy labels,
/// chosen over rejecting the update.
pub fn bump_version(version: &str) -> String {
    let parts: Vec<&str> = version.split('.').collect();
    if let [major, minor] = parts[..] {
        if let (Ok(major), Ok(minor)) = (major.parse::<u64>(), minor.parse::<u64>()) {
            return format!("{major}.{}", minor + 1);
        }
    }
    "1.1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_version_increments_minor() {
        assert_eq!(bump_version("1.0"), "1.1");
        assert_eq!(bump_version("2.9"), "2.10");
        assert_eq!(bump_version("0.0"), "0.1");
    }

    #[test]
    fn test_bump_version_resets_malformed_labels() {
        assert_eq!(bump_version("legacy"), "1.1");
        assert_eq!(bump_version("1.2.3"), "1.1");
        assert_eq!(bump_version("1.x"), "1.1");
        assert_eq!(bump_version("-1.0"), "1.1");
        assert_eq!(bump_version(""), "1.1");
    }

    #[test]
    fn test_sanitize_title_normalizes_whitespace_and_case() {
        assert_eq!(sanitize_title("  hello   world  "), "Hello World");
        assert_eq!(sanitize_title("HELLO WORLD"), "Hello World");
    }

    #[test]
    fn test_sanitize_title_is_idempotent() {
        assert_eq!(sanitize_title("Hello World"), "Hello World");
        let once = sanitize_title("  mixed CASE   input ");
        assert_eq!(sanitize_title(&once), once);
    }

    #[test]
    fn test_require_field_rejects_whitespace_only() {
        assert!(require_field("title", "   ").is_err());
        assert_eq!(require_field("title", " ok ").unwrap(), "ok");
    }
}
