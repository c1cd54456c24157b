//! Data-access layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept any SQLite executor as the first argument, so the same call runs
//! against the pool or inside a caller-owned transaction.

pub mod category_repo;
pub mod resource_repo;

pub use category_repo::CategoryRepo;
pub use resource_repo::ResourceRepo;
