//! Presentation surfaces built on egui

mod components;
mod configurator;
pub mod constants;
pub mod painter;

pub use configurator::run_gui;
