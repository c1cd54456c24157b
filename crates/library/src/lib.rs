//! Domain repository for the Impulso resource organizer.
//!
//! [`Library`] is the single place where referential integrity and the
//! placeholder-record lifecycle are enforced. Every mutating store access
//! flows through it:
//!
//! - resources are only written when their category exists
//! - cascade delete and resource migration run as one transaction each
//! - the in-memory example resource is shown while the store is empty and
//!   disappears as soon as one real resource exists
//! - every store call is bounded by a timeout

pub mod categories;
pub mod error;
pub mod library;
pub mod orchestration;
pub mod resources;

pub use error::{ErrorKind, LibraryError, LibraryResult, StoreError};
pub use library::{Library, DEFAULT_STORE_TIMEOUT};
