use anyhow::Context;
use impulso_app::{telemetry, App, AppConfig};
use impulso_core::dates::format_relative;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(
        database_url = %config.database_url,
        store_timeout_secs = config.store_timeout_secs,
        "Loaded configuration"
    );

    let app = App::bootstrap(config)
        .await
        .context("Failed to start Impulso")?;

    if let Some(stats) = app.categories.dashboard_stats().await {
        tracing::info!(
            categories = stats.total_categories,
            resources = stats.total_resources,
            "Library summary"
        );
    }

    for category in app.categories.categories_with_count().data() {
        tracing::info!(
            category_id = category.category.id,
            name = %category.category.name,
            icon = category.category.icon_option().label,
            resources = category.resource_count,
            "Category"
        );
    }

    for resource in app.resources.resources().data() {
        tracing::info!(
            resource_id = resource.id,
            name = %resource.name,
            link = resource.link.as_deref().unwrap_or("-"),
            favorite = resource.is_favorite,
            added = %format_relative(&resource.created_at),
            "Resource"
        );
    }

    app.shutdown().await;
    Ok(())
}
