//! SQLite store and data-access layer.
//!
//! Owns connection setup, the embedded schema migrations, the row models,
//! and one zero-sized repository struct per table. Nothing here enforces
//! business rules; that is the job of the domain layer built on top.

use std::str::FromStr;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Tables dropped when the recorded schema no longer matches [`MIGRATOR`].
/// Children first so the foreign key never dangles.
const RESET_TABLES: &[&str] = &["resource", "category", "_sqlx_migrations"];

/// Create a connection pool from a database URL.
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection. In-memory databases are limited to a single connection
/// so that every query sees the same database.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
    if in_memory {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }
    pool_options.connect_with(options).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Apply migrations, recreating the schema from scratch if the recorded
/// migration history does not match the embedded migrations.
///
/// This is the only migration strategy: on mismatch all data is discarded.
pub async fn reset_and_migrate(pool: &DbPool) -> Result<(), MigrateError> {
    match MIGRATOR.run(pool).await {
        Ok(()) => Ok(()),
        Err(
            e @ (MigrateError::VersionMismatch(_)
            | MigrateError::VersionMissing(_)
            | MigrateError::Dirty(_)
            | MigrateError::ExecuteMigration(..)),
        ) => {
            tracing::warn!(error = %e, "Schema mismatch, recreating database");
            drop_schema(pool).await.map_err(MigrateError::Execute)?;
            MIGRATOR.run(pool).await
        }
        Err(e) => Err(e),
    }
}

async fn drop_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for table in RESET_TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}
