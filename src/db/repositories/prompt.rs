//! Prompt repository - CRUD, tag mappings, and version history.

use sqlx::SqlitePool;

use crate::db::entities::{Prompt, PromptVersion, Tag, UpdatePrompt};
use crate::db::error::DbError;

/// Repository for prompt operations.
///
/// Multi-statement writes (create with mappings, update with snapshot, delete
/// with cascade) each run in a single transaction; a failure on any statement
/// rolls the whole operation back.
#[derive(Clone)]
pub struct PromptRepository {
    pool: SqlitePool,
}

impl PromptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a prompt by ID.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Prompt>, DbError> {
        let prompt = sqlx::query_as::<_, Prompt>(
            r#"
            SELECT id, title, content, version, model_type, created_at, updated_at
            FROM prompts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prompt)
    }

    /// List prompts matching the SQL-side criteria.
    ///
    /// `model_type` requires an exact match; `text` a case-sensitive substring
    /// match against title or content. Either may be None to skip the
    /// criterion. No ordering is imposed beyond the store's native order.
    pub async fn search(
        &self,
        model_type: Option<&str>,
        text: Option<&str>,
    ) -> Result<Vec<Prompt>, DbError> {
        let prompts = sqlx::query_as::<_, Prompt>(
            r#"
            SELECT id, title, content, version, model_type, created_at, updated_at
            FROM prompts
            WHERE (?1 IS NULL OR model_type = ?1)
              AND (?2 IS NULL OR instr(title, ?2) > 0 OR instr(content, ?2) > 0)
            "#,
        )
        .bind(model_type)
        .bind(text)
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    /// Create a new prompt and its tag mappings as one unit.
    pub async fn create(&self, prompt: &Prompt, tag_ids: &[String]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO prompts (id, title, content, version, model_type, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&prompt.id)
        .bind(&prompt.title)
        .bind(&prompt.content)
        .bind(&prompt.version)
        .bind(&prompt.model_type)
        .bind(prompt.created_at)
        .bind(prompt.updated_at)
        .execute(&mut *tx)
        .await?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO prompt_tags (prompt_id, tag_id) VALUES (?1, ?2)")
                .bind(&prompt.id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Apply an update: optional history snapshot, field writes, and full tag
    /// mapping replacement, all in one transaction.
    ///
    /// The snapshot carries the pre-update content and version label; it is
    /// written first so a failed update leaves no history entry behind.
    pub async fn update(
        &self,
        id: &str,
        update: &UpdatePrompt,
        snapshot: Option<&PromptVersion>,
        tag_ids: &[String],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        if let Some(snapshot) = snapshot {
            sqlx::query(
                r#"
                INSERT INTO prompt_versions (id, prompt_id, content, version, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&snapshot.id)
            .bind(&snapshot.prompt_id)
            .bind(&snapshot.content)
            .bind(&snapshot.version)
            .bind(snapshot.created_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            UPDATE prompts
            SET title = ?2, content = ?3, model_type = ?4, version = ?5, updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.model_type)
        .bind(&update.version)
        .bind(update.updated_at)
        .execute(&mut *tx)
        .await?;

        // Replace tag mappings. Mappings absent from the new set are dropped;
        // tag rows themselves are never deleted.
        sqlx::query("DELETE FROM prompt_tags WHERE prompt_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for tag_id in tag_ids {
            sqlx::query("INSERT INTO prompt_tags (prompt_id, tag_id) VALUES (?1, ?2)")
                .bind(id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a prompt, its tag mappings, and its version snapshots.
    ///
    /// Returns false when the prompt did not exist.
    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM prompt_tags WHERE prompt_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Snapshots share the prompt's lifetime.
        sqlx::query("DELETE FROM prompt_versions WHERE prompt_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM prompts WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get the tags mapped to a prompt.
    pub async fn tags_for(&self, prompt_id: &str) -> Result<Vec<Tag>, DbError> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN prompt_tags pt ON pt.tag_id = t.id
            WHERE pt.prompt_id = ?1
            ORDER BY t.name ASC
            "#,
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// Get the version history for a prompt, newest first.
    pub async fn list_versions(&self, prompt_id: &str) -> Result<Vec<PromptVersion>, DbError> {
        let versions = sqlx::query_as::<_, PromptVersion>(
            r#"
            SELECT id, prompt_id, content, version, created_at
            FROM prompt_versions
            WHERE prompt_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(versions)
    }
}
