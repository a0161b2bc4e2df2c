//! Tag repository - lookup and creation of tags.

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::db::entities::Tag;
use crate::db::error::DbError;

/// Repository for tag operations.
#[derive(Clone)]
pub struct TagRepository {
    pool: SqlitePool,
}

impl TagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a tag by name (exact, case-sensitive match).
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, DbError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tag)
    }

    /// List all tags.
    pub async fn find_all(&self) -> Result<Vec<Tag>, DbError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    /// Create a new tag.
    pub async fn create(&self, tag: &Tag) -> Result<(), DbError> {
        sqlx::query("INSERT INTO tags (id, name) VALUES (?1, ?2)")
            .bind(&tag.id)
            .bind(&tag.name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get or create a tag by name. Creation commits immediately rather than
    /// joining any transaction the caller may run afterwards.
    pub async fn get_or_create(&self, name: &str) -> Result<Tag, DbError> {
        if let Some(tag) = self.find_by_name(name).await? {
            return Ok(tag);
        }

        let tag = Tag::new(name);
        self.create(&tag).await?;
        Ok(tag)
    }

    /// Resolve free-text tag names to canonical tags.
    ///
    /// Names are trimmed; empties are dropped and duplicates collapse to the
    /// first occurrence. Result order follows first occurrence in the input.
    pub async fn resolve_names(&self, names: &[String]) -> Result<Vec<Tag>, DbError> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();

        for name in names {
            let name = name.trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }
            tags.push(self.get_or_create(name).await?);
        }

        Ok(tags)
    }
}
