//! Integration tests for the prompt store, against in-memory SQLite.
//!
//! - Tag idempotence: the same name resolves to the same row across calls
//! - Version increments on content change, with the "1.1" reset for
//!   malformed labels
//! - No-op updates skip the snapshot but stamp updated_at
//! - Search AND/OR semantics across model type, text, and tags
//! - Silent delete of missing ids; delete cascades mappings and snapshots
//! - Version history returns newest first

use sqlx::SqlitePool;

use prompthub::db::{self, entities::PromptWithTags};
use prompthub::store::{PromptStore, SearchFilter};

async fn setup() -> (SqlitePool, PromptStore) {
    let pool = db::connect("sqlite::memory:").await.unwrap();
    db::migrate(&pool).await.unwrap();
    let store = PromptStore::new(pool.clone());
    (pool, store)
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn ids(prompts: &[PromptWithTags]) -> Vec<&str> {
    prompts.iter().map(|p| p.prompt.id.as_str()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tag registry
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_tag_resolution_is_idempotent() {
    let (_pool, store) = setup().await;

    let p1 = store
        .create("First", "gpt-4", "content one", &tags(&["rust"]))
        .await
        .unwrap();
    let p2 = store
        .create("Second", "gpt-4", "content two", &tags(&["rust"]))
        .await
        .unwrap();

    assert_eq!(p1.tags.len(), 1);
    assert_eq!(p1.tags[0].id, p2.tags[0].id);

    let all = store.list_tags().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "rust");
}

#[tokio::test]
async fn test_tag_resolution_trims_and_collapses_duplicates() {
    let (_pool, store) = setup().await;

    let p = store
        .create(
            "Tagged",
            "gpt-4",
            "content",
            &tags(&[" code ", "code", "   ", "debug"]),
        )
        .await
        .unwrap();

    let names: Vec<&str> = p.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["code", "debug"]);
}

#[tokio::test]
async fn test_tag_names_are_case_sensitive() {
    let (_pool, store) = setup().await;

    store
        .create("One", "gpt-4", "a", &tags(&["Rust"]))
        .await
        .unwrap();
    store
        .create("Two", "gpt-4", "b", &tags(&["rust"]))
        .await
        .unwrap();

    assert_eq!(store.list_tags().await.unwrap().len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// Create / validation
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_starts_at_version_1_0_with_sanitized_title() {
    let (_pool, store) = setup().await;

    let p = store
        .create("  my   first prompt  ", "claude-3-opus", "hello", &[])
        .await
        .unwrap();

    assert_eq!(p.prompt.version, "1.0");
    assert_eq!(p.prompt.title, "My First Prompt");
    assert_eq!(p.prompt.model_type, "claude-3-opus");
    assert!(p.tags.is_empty());
}

#[tokio::test]
async fn test_create_rejects_empty_required_fields() {
    let (_pool, store) = setup().await;

    let err = store.create("   ", "gpt-4", "content", &[]).await.unwrap_err();
    assert!(err.is_validation());

    let err = store.create("Title", "gpt-4", "  ", &[]).await.unwrap_err();
    assert!(err.is_validation());

    let err = store.create("Title", "", "content", &[]).await.unwrap_err();
    assert!(err.is_validation());
}

// ═══════════════════════════════════════════════════════════════════════════
// Update / versioning
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_content_changes_increment_minor_version() {
    let (_pool, store) = setup().await;

    let p = store.create("Prompt", "gpt-4", "v0", &[]).await.unwrap();
    let id = p.prompt.id;

    let p = store.update(&id, "Prompt", "gpt-4", "v1", &[]).await.unwrap();
    assert_eq!(p.prompt.version, "1.1");

    let p = store.update(&id, "Prompt", "gpt-4", "v2", &[]).await.unwrap();
    assert_eq!(p.prompt.version, "1.2");

    let p = store.update(&id, "Prompt", "gpt-4", "v3", &[]).await.unwrap();
    assert_eq!(p.prompt.version, "1.3");
}

#[tokio::test]
async fn test_malformed_version_label_resets_to_1_1() {
    let (pool, store) = setup().await;

    let p = store.create("Prompt", "gpt-4", "old", &[]).await.unwrap();
    let id = p.prompt.id;

    // Simulate a legacy row with a label that does not parse.
    sqlx::query("UPDATE prompts SET version = 'legacy' WHERE id = ?1")
        .bind(&id)
        .execute(&pool)
        .await
        .unwrap();

    let p = store.update(&id, "Prompt", "gpt-4", "new", &[]).await.unwrap();
    assert_eq!(p.prompt.version, "1.1");

    // The snapshot still carries the old label verbatim.
    let versions = store.list_versions(&id).await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version, "legacy");
    assert_eq!(versions[0].content, "old");
}

#[tokio::test]
async fn test_snapshot_holds_old_content_and_label() {
    let (_pool, store) = setup().await;

    let p = store.create("Prompt", "gpt-4", "first draft", &[]).await.unwrap();
    let id = p.prompt.id;

    store
        .update(&id, "Prompt", "gpt-4", "second draft", &[])
        .await
        .unwrap();

    let versions = store.list_versions(&id).await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].content, "first draft");
    assert_eq!(versions[0].version, "1.0");
    assert_eq!(versions[0].prompt_id, id);
}

#[tokio::test]
async fn test_noop_update_skips_snapshot_but_stamps_updated_at() {
    let (_pool, store) = setup().await;

    let p = store.create("Prompt", "gpt-4", "same", &[]).await.unwrap();
    let id = p.prompt.id;
    let before = p.prompt.updated_at;

    let p = store.update(&id, "Prompt", "gpt-4", "same", &[]).await.unwrap();

    assert_eq!(p.prompt.version, "1.0");
    assert!(store.list_versions(&id).await.unwrap().is_empty());
    assert!(p.prompt.updated_at >= before);
}

#[tokio::test]
async fn test_update_missing_prompt_is_not_found() {
    let (_pool, store) = setup().await;

    let err = store
        .update("no-such-id", "Title", "gpt-4", "content", &[])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_replaces_tag_mappings_but_keeps_tag_rows() {
    let (_pool, store) = setup().await;

    let p = store
        .create("Prompt", "gpt-4", "content", &tags(&["old-tag"]))
        .await
        .unwrap();
    let id = p.prompt.id;

    let p = store
        .update(&id, "Prompt", "gpt-4", "content", &tags(&["new-tag"]))
        .await
        .unwrap();

    let names: Vec<&str> = p.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["new-tag"]);

    // The orphaned tag row persists for future reuse.
    let all: Vec<String> = store
        .list_tags()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(all, vec!["new-tag", "old-tag"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Version history ordering
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_version_history_is_newest_first() {
    let (_pool, store) = setup().await;

    let p = store.create("Prompt", "gpt-4", "v0", &[]).await.unwrap();
    let id = p.prompt.id;

    store.update(&id, "Prompt", "gpt-4", "v1", &[]).await.unwrap();
    store.update(&id, "Prompt", "gpt-4", "v2", &[]).await.unwrap();
    store.update(&id, "Prompt", "gpt-4", "v3", &[]).await.unwrap();

    let versions = store.list_versions(&id).await.unwrap();
    assert_eq!(versions.len(), 3);

    let labels: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
    assert_eq!(labels, vec!["1.2", "1.1", "1.0"]);

    for pair in versions.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Delete
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_delete_missing_prompt_is_silent() {
    let (_pool, store) = setup().await;

    store.delete("9999").await.unwrap();
}

#[tokio::test]
async fn test_delete_removes_mappings_and_snapshots() {
    let (_pool, store) = setup().await;

    let p = store
        .create("Prompt", "gpt-4", "v0", &tags(&["keep-me"]))
        .await
        .unwrap();
    let id = p.prompt.id;
    store.update(&id, "Prompt", "gpt-4", "v1", &[]).await.unwrap();

    store.delete(&id).await.unwrap();

    assert!(store.search(&SearchFilter::default()).await.unwrap().is_empty());
    assert!(store.list_versions(&id).await.unwrap().is_empty());

    // Tag rows outlive the prompts that referenced them.
    assert_eq!(store.list_tags().await.unwrap().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Search
// ═══════════════════════════════════════════════════════════════════════════

async fn seed_search_fixtures(store: &PromptStore) -> (String, String, String) {
    let p1 = store
        .create("Alpha", "gpt-4", "summarize this article", &tags(&["a"]))
        .await
        .unwrap();
    let p2 = store
        .create("Beta", "gpt-4", "translate to French", &tags(&["b"]))
        .await
        .unwrap();
    let p3 = store
        .create("Gamma", "claude", "review my unit tests", &tags(&["a"]))
        .await
        .unwrap();

    (p1.prompt.id, p2.prompt.id, p3.prompt.id)
}

#[tokio::test]
async fn test_search_combines_model_and_tag_criteria_with_and() {
    let (_pool, store) = setup().await;
    let (p1, _p2, _p3) = seed_search_fixtures(&store).await;

    let results = store
        .search(&SearchFilter {
            model_type: Some("gpt-4".to_string()),
            tag_names: vec!["a".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(ids(&results), vec![p1.as_str()]);
}

#[tokio::test]
async fn test_search_tag_criterion_is_an_or_within_the_set() {
    let (_pool, store) = setup().await;
    let (p1, p2, p3) = seed_search_fixtures(&store).await;

    let results = store
        .search(&SearchFilter {
            tag_names: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();

    let found = ids(&results);
    assert_eq!(found.len(), 3);
    assert!(found.contains(&p1.as_str()));
    assert!(found.contains(&p2.as_str()));
    assert!(found.contains(&p3.as_str()));
}

#[tokio::test]
async fn test_search_text_matches_title_or_content() {
    let (_pool, store) = setup().await;
    let (_p1, _p2, p3) = seed_search_fixtures(&store).await;

    // Substring of p3's content.
    let results = store
        .search(&SearchFilter {
            text: Some("unit tests".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&results), vec![p3.as_str()]);

    // Substring of p3's (sanitized) title.
    let results = store
        .search(&SearchFilter {
            text: Some("Gamma".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(&results), vec![p3.as_str()]);
}

#[tokio::test]
async fn test_search_text_is_case_sensitive() {
    let (_pool, store) = setup().await;
    seed_search_fixtures(&store).await;

    let results = store
        .search(&SearchFilter {
            text: Some("FRENCH".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_without_criteria_returns_everything_with_tags_loaded() {
    let (_pool, store) = setup().await;
    seed_search_fixtures(&store).await;

    let results = store.search(&SearchFilter::default()).await.unwrap();
    assert_eq!(results.len(), 3);
    for p in &results {
        assert_eq!(p.tags.len(), 1);
    }
}
