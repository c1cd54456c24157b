//! Shared building blocks for the Impulso resource organizer.
//!
//! Everything in this crate is pure logic with zero internal dependencies so
//! that the storage, domain, and view-state layers can all build on it.

pub mod dates;
pub mod error;
pub mod icons;
pub mod sample;
pub mod search;
pub mod share;
pub mod types;
pub mod validation;
