//! HTTP request handlers for the prompt API.
//!
//! Thin JSON adapters over the prompt store:
//! - GET    /api/prompts            - search with optional filters
//! - POST   /api/prompts            - create
//! - PUT    /api/prompts/:id        - update (may snapshot a version)
//! - DELETE /api/prompts/:id        - delete (silent on missing id)
//! - GET    /api/prompts/:id/versions
//! - GET    /api/tags
//! - GET    /api/model-types
//! - GET    /healthz

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::config::AppState;
use crate::db::DbError;
use crate::types::{CreatePromptRequest, SearchParams, UpdatePromptRequest};

/// Map a store error to a status code and JSON error body.
fn error_response(err: DbError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        DbError::Validation(_) => StatusCode::BAD_REQUEST,
        DbError::NotFound => StatusCode::NOT_FOUND,
        DbError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("storage failure: {err}");
    }

    (status, Json(json!({ "error": err.to_string() })))
}

// ═══════════════════════════════════════════════════════════════════════════
// Prompts
// ═══════════════════════════════════════════════════════════════════════════

/// GET /api/prompts
pub async fn search_prompts_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match state.store.search(&params.into_filter()).await {
        Ok(prompts) => (StatusCode::OK, Json(json!(prompts))),
        Err(err) => error_response(err),
    }
}

/// POST /api/prompts
pub async fn create_prompt_handler(
    State(state): State<AppState>,
    Json(body): Json<CreatePromptRequest>,
) -> impl IntoResponse {
    match state
        .store
        .create(&body.title, &body.model_type, &body.content, &body.tag_names)
        .await
    {
        Ok(prompt) => (StatusCode::CREATED, Json(json!(prompt))),
        Err(err) => error_response(err),
    }
}

/// PUT /api/prompts/:id
pub async fn update_prompt_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePromptRequest>,
) -> impl IntoResponse {
    match state
        .store
        .update(
            &id,
            &body.title,
            &body.model_type,
            &body.content,
            &body.tag_names,
        )
        .await
    {
        Ok(prompt) => (StatusCode::OK, Json(json!(prompt))),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/prompts/:id
pub async fn delete_prompt_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.delete(&id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "deleted" }))),
        Err(err) => error_response(err),
    }
}

/// GET /api/prompts/:id/versions
pub async fn list_versions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.list_versions(&id).await {
        Ok(versions) => (StatusCode::OK, Json(json!(versions))),
        Err(err) => error_response(err),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tags and configuration
// ═══════════════════════════════════════════════════════════════════════════

/// GET /api/tags
pub async fn list_tags_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_tags().await {
        Ok(tags) => (StatusCode::OK, Json(json!(tags))),
        Err(err) => error_response(err),
    }
}

/// GET /api/model-types
pub async fn model_types_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(json!(state.config.model_types)))
}

/// GET /healthz
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
