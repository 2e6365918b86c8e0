//! User interface module - egui-based control console

mod app;
mod components;
mod panels;
mod theme;

pub use app::QuantumCoreApp;
