//! End-to-end wiring of the application over an in-memory store.

use assert_matches::assert_matches;
use impulso_app::{App, AppConfig, BootstrapError};
use impulso_core::sample::{SAMPLE_CATEGORIES, SAMPLE_RESOURCES};
use impulso_core::types::PLACEHOLDER_ID;
use sqlx::SqlitePool;

fn in_memory(seed_sample_data: bool) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        seed_sample_data,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_bootstrap_seeds_and_loads() {
    let app = App::bootstrap(in_memory(true)).await.unwrap();

    assert_eq!(app.categories.categories().data().len(), SAMPLE_CATEGORIES.len());
    assert_eq!(app.resources.resources().data().len(), SAMPLE_RESOURCES.len());
    assert_eq!(
        app.resources.resources_with_category().data().len(),
        SAMPLE_RESOURCES.len()
    );
    assert!(app.categories.categories().is_live());

    app.shutdown().await;
}

#[tokio::test]
async fn test_bootstrap_without_seed_shows_placeholder() {
    let app = App::bootstrap(in_memory(false)).await.unwrap();

    assert!(app.categories.categories().data().is_empty());
    let resources = app.resources.resources().data();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].id, PLACEHOLDER_ID);

    let categories = std::sync::Arc::clone(&app.categories);
    app.shutdown().await;
    assert!(!categories.categories().is_live());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_only_on_empty_store(pool: SqlitePool) {
    let first = App::with_pool(in_memory(true), pool.clone()).await.unwrap();
    let stats = first.library.get_dashboard_stats().await.unwrap();
    first.categories.detach();
    first.resources.detach();

    let second = App::with_pool(in_memory(true), pool).await.unwrap();
    assert_eq!(second.library.get_dashboard_stats().await.unwrap(), stats);
    assert_eq!(stats.total_categories, SAMPLE_CATEGORIES.len() as i64);
}

#[tokio::test]
async fn test_bad_database_url_fails() {
    let config = AppConfig {
        database_url: "sqlite://missing-dir/nested/impulso.db".into(),
        ..AppConfig::default()
    };
    assert_matches!(
        App::bootstrap(config).await.err(),
        Some(BootstrapError::Connect(_))
    );
}
