//! Prompthub server binary.
//!
//! Wires the prompt store to a JSON/HTTP surface for the UI:
//!
//! - `GET    /api/prompts` - search prompts
//! - `POST   /api/prompts` - create prompt
//! - `PUT    /api/prompts/:id` - update prompt
//! - `DELETE /api/prompts/:id` - delete prompt
//! - `GET    /api/prompts/:id/versions` - version history
//! - `GET    /api/tags` - all tags
//! - `GET    /api/model-types` - configured model types
//! - `GET    /healthz` - health check

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prompthub::config::{AppState, Config};
use prompthub::db;
use prompthub::handlers::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompthub=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    info!("Starting Prompthub");
    info!("Database: {}", config.database_url);
    info!("Binding to: {}", bind_addr);

    // Connect and migrate
    let pool = db::connect(&config.database_url).await?;
    db::migrate(&pool).await?;

    // Create shared state
    let state = AppState::new(config, pool);

    // Build router
    let app = Router::new()
        .route("/api/prompts", get(search_prompts_handler))
        .route("/api/prompts", post(create_prompt_handler))
        .route("/api/prompts/:id", put(update_prompt_handler))
        .route("/api/prompts/:id", delete(delete_prompt_handler))
        .route("/api/prompts/:id/versions", get(list_versions_handler))
        .route("/api/tags", get(list_tags_handler))
        .route("/api/model-types", get(model_types_handler))
        .route("/healthz", get(health_handler))
        // Add CORS support
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        // Add request tracing
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
