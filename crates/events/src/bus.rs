//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`LibraryEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` between the domain layer
//! and every view-state container.

use chrono::{DateTime, Utc};
use impulso_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// LibraryEvent
// ---------------------------------------------------------------------------

/// What kind of committed change an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    CategoryCreated,
    CategoryUpdated,
    /// A category was removed, together with any resources filed under it.
    CategoryDeleted,
    ResourceCreated,
    ResourceUpdated,
    ResourceDeleted,
    ResourcesMigrated,
    SampleDataSeeded,
}

impl ChangeKind {
    /// Whether resource lists may be stale after this change.
    pub fn affects_resources(self) -> bool {
        !matches!(self, Self::CategoryCreated)
    }

    /// Whether category lists (including per-category counts) may be stale
    /// after this change.
    pub fn affects_categories(self) -> bool {
        true
    }
}

/// A committed change to the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEvent {
    pub kind: ChangeKind,

    /// Id of the category or resource the change applies to, if any.
    pub entity_id: Option<DbId>,

    /// When the change was committed (UTC).
    pub timestamp: DateTime<Utc>,
}

impl LibraryEvent {
    pub fn new(kind: ChangeKind) -> Self {
        Self {
            kind,
            entity_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the affected entity id.
    pub fn with_entity(mut self, id: DbId) -> Self {
        self.entity_id = Some(id);
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out change bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`LibraryEvent`].
///
/// # Usage
///
/// ```rust
/// use impulso_events::bus::{ChangeKind, EventBus, LibraryEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(LibraryEvent::new(ChangeKind::CategoryCreated).with_entity(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<LibraryEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: LibraryEvent) {
        tracing::trace!(kind = ?event.kind, entity_id = ?event.entity_id, "Publishing change");
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(LibraryEvent::new(ChangeKind::ResourceUpdated).with_entity(42));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.kind, ChangeKind::ResourceUpdated);
        assert_eq!(received.entity_id, Some(42));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(LibraryEvent::new(ChangeKind::CategoryDeleted));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.kind, ChangeKind::CategoryDeleted);
        assert_eq!(e2.kind, ChangeKind::CategoryDeleted);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(LibraryEvent::new(ChangeKind::SampleDataSeeded));
    }

    #[test]
    fn category_creation_leaves_resource_lists_alone() {
        assert!(!ChangeKind::CategoryCreated.affects_resources());
        assert!(ChangeKind::CategoryDeleted.affects_resources());
        assert!(ChangeKind::ResourceCreated.affects_categories());
    }

    #[test]
    fn event_serializes_with_snake_case_kind() {
        let event = LibraryEvent::new(ChangeKind::ResourcesMigrated).with_entity(3);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "resources_migrated");
        assert_eq!(json["entity_id"], 3);
    }
}
