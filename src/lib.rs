//! Library exports for the binary and for tests.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted UI settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Tracing setup.
pub mod logging;
/// Training records, validation and the in-memory log.
pub mod training;
