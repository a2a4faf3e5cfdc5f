//! egui front end: UI state, the controller that owns the training log, and the renderer.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
