//! The [`Library`] handle and the plumbing shared by its operations.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use impulso_core::types::DbId;
use impulso_db::DbPool;
use impulso_events::{ChangeKind, EventBus, LibraryEvent};
use sqlx::{Sqlite, Transaction};

use crate::error::{LibraryError, LibraryResult, StoreError};

/// Upper bound for a single store operation unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Domain repository over the category and resource tables.
///
/// Cheap to share behind an `Arc`; all state lives in the pool.
pub struct Library {
    pool: DbPool,
    store_timeout: Duration,
    events: Option<Arc<EventBus>>,
}

impl Library {
    /// Build a library over an already-migrated pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            events: None,
        }
    }

    /// Bound every store operation by `timeout`.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Publish a [`LibraryEvent`] on `bus` after every committed mutation.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    /// Open a transaction that takes the write lock up front.
    ///
    /// Required for any transaction that reads before it writes: a deferred
    /// one fails with `SQLITE_BUSY` once another writer commits in between,
    /// while `BEGIN IMMEDIATE` waits on the busy timeout.
    pub(crate) async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }

    /// Run one store operation under the configured timeout.
    ///
    /// On expiry the operation future is dropped, which rolls back any
    /// transaction it had open.
    pub(crate) async fn run<T, E, F>(&self, operation: &'static str, fut: F) -> LibraryResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<LibraryError>,
    {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let err = e.into();
                if let LibraryError::Store(store) = &err {
                    tracing::error!(operation, error = %store, "Store operation failed");
                }
                Err(err)
            }
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "Store operation timed out"
                );
                Err(StoreError::Timeout(self.store_timeout).into())
            }
        }
    }

    /// Announce a committed change.
    pub(crate) fn publish(&self, kind: ChangeKind, entity_id: Option<DbId>) {
        if let Some(bus) = &self.events {
            let mut event = LibraryEvent::new(kind);
            if let Some(id) = entity_id {
                event = event.with_entity(id);
            }
            bus.publish(event);
        }
    }
}
