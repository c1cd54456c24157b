//! Composition root: configuration, tracing, and the wiring of store,
//! library, event bus and view states into one [`App`].

pub mod app;
pub mod config;
pub mod telemetry;

pub use app::{App, BootstrapError};
pub use config::AppConfig;
