//! Change notifications for the Impulso library.
//!
//! The domain layer publishes a [`LibraryEvent`] after every committed
//! mutation; view-state containers subscribe to keep surfaces that did not
//! issue the mutation in sync with the store.

pub mod bus;

pub use bus::{ChangeKind, EventBus, LibraryEvent};
