use std::sync::Arc;
use std::time::Duration;

use impulso_db::DbPool;
use impulso_events::EventBus;
use impulso_library::{Library, LibraryError};
use impulso_state::{CategoryViewState, ResourceViewState};
use sqlx::migrate::MigrateError;
use tokio::task::JoinHandle;

use crate::config::AppConfig;

/// How long [`App::shutdown`] waits for each sync task.
const SYNC_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to open database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Database health check failed: {0}")]
    HealthCheck(#[source] sqlx::Error),

    #[error("Failed to migrate database: {0}")]
    Migrate(#[from] MigrateError),

    #[error("Failed to seed sample data: {0}")]
    Seed(#[source] LibraryError),
}

/// A fully wired application: store, library, event bus and view states.
pub struct App {
    pub config: AppConfig,
    pub library: Arc<Library>,
    pub events: Arc<EventBus>,
    pub categories: Arc<CategoryViewState>,
    pub resources: Arc<ResourceViewState>,
    sync_tasks: Vec<JoinHandle<()>>,
}

impl App {
    /// Open the store, bring its schema up to date and load the initial
    /// view state.
    pub async fn bootstrap(config: AppConfig) -> Result<Self, BootstrapError> {
        let pool = impulso_db::create_pool(&config.database_url)
            .await
            .map_err(BootstrapError::Connect)?;
        tracing::info!(database_url = %config.database_url, "Database connection pool created");

        impulso_db::health_check(&pool)
            .await
            .map_err(BootstrapError::HealthCheck)?;

        impulso_db::reset_and_migrate(&pool).await?;
        tracing::info!("Database migrations applied");

        Self::with_pool(config, pool).await
    }

    /// Wire the application over an already-migrated pool.
    pub async fn with_pool(config: AppConfig, pool: DbPool) -> Result<Self, BootstrapError> {
        let events = Arc::new(EventBus::new(config.event_bus_capacity));
        let library = Arc::new(
            Library::new(pool)
                .with_store_timeout(config.store_timeout())
                .with_event_bus(Arc::clone(&events)),
        );

        if config.seed_sample_data {
            library
                .seed_sample_data()
                .await
                .map_err(BootstrapError::Seed)?;
        }

        let categories = Arc::new(CategoryViewState::new(Arc::clone(&library)));
        let resources = Arc::new(ResourceViewState::new(Arc::clone(&library)));
        let sync_tasks = vec![
            categories.spawn_sync(events.subscribe()),
            resources.spawn_sync(events.subscribe()),
        ];

        tokio::join!(
            categories.refresh_all(),
            resources.refresh_resources(),
            resources.refresh_resources_with_category(),
        );
        tracing::info!("Application ready");

        Ok(Self {
            config,
            library,
            events,
            categories,
            resources,
            sync_tasks,
        })
    }

    /// Detach the view states, stop their sync tasks and close the pool.
    pub async fn shutdown(self) {
        self.categories.detach();
        self.resources.detach();
        for task in self.sync_tasks {
            let _ = tokio::time::timeout(SYNC_SHUTDOWN_TIMEOUT, task).await;
        }
        self.library.pool().close().await;
        tracing::info!("Shutdown complete");
    }
}
