//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO carrying the full set of mutable columns

pub mod category;
pub mod resource;
pub mod stats;
