//! Configuration module - environment-based configuration.

use std::env;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::store::PromptStore;

/// Model types offered to the UI for selection. The store itself accepts any
/// model-type string; this list only feeds the dropdown.
pub const DEFAULT_MODEL_TYPES: &[&str] = &[
    "gpt-4",
    "gpt-4-turbo",
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-16k",
    "claude-3-opus",
    "claude-3-sonnet",
    "claude-3-haiku",
    "claude-2",
    "claude-instant",
    "llama-2-7b",
    "llama-2-13b",
    "llama-2-70b",
    "llama-3-8b",
    "llama-3-70b",
    "gemini-pro",
    "gemini-pro-vision",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
    "mistral-7b",
    "mixtral-8x7b",
    "codellama-34b",
    "other",
];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Server config
    pub host: String,
    pub port: u16,

    /// Connection target. Defaults to a local SQLite file.
    pub database_url: String,

    /// Allowed model-type strings for the UI.
    pub model_types: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("PROMPTHUB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://prompthub.db".to_string());

        let model_types = match env::var("PROMPTHUB_MODEL_TYPES") {
            Ok(list) => list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_MODEL_TYPES.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            host,
            port,
            database_url,
            model_types,
        }
    }

    /// Get server bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: PromptStore,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            config: Arc::new(config),
            store: PromptStore::new(pool),
        }
    }
}
