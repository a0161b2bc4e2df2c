//! SQLite persistence layer.
//!
//! Three tables (`prompts`, `tags`, `prompt_tags`) plus the append-only
//! `prompt_versions` history. The connection target comes from `DATABASE_URL`;
//! a local file-backed database is created on demand when it points at a
//! missing file.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod schema;

pub use error::{DbError, DbResult};

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Connect to the SQLite database, creating the file if missing.
pub async fn connect(database_url: &str) -> DbResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Each `:memory:` connection gets its own database, so those pools must
    // stay single-connection.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run the schema migration. Statements are idempotent, so this is safe to
/// call on every startup.
pub async fn migrate(pool: &SqlitePool) -> DbResult<()> {
    for statement in schema::SCHEMA.split(';') {
        if statement.trim().is_empty() {
            continue;
        }
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
