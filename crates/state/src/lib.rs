//! Reactive view state for the Impulso presentation layer.
//!
//! Holds the snapshot of categories and resources a UI renders, together
//! with loading and error flags. Every container is fully reloaded from the
//! [`Library`](impulso_library::Library) after each successful mutation; no
//! incremental patching is ever applied.
//!
//! - [`StateContainer`] is a latest-value cell backed by a
//!   `tokio::sync::watch` channel that any number of observers can subscribe
//!   to.
//! - [`CategoryViewState`] and [`ResourceViewState`] wrap the library
//!   operations in the load/report protocol.

pub mod categories;
pub mod container;
pub mod resources;

pub use categories::CategoryViewState;
pub use container::{Fallback, ListState, Phase, StateContainer};
pub use resources::{ResourceFilter, ResourceViewState};
