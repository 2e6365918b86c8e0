//! Core module - Readings, console log, display state and the simulation loop

pub mod console;
pub mod error;
pub mod reading;
pub mod settings;
mod simulation;
mod surface;

pub use settings::Settings;
pub use simulation::{build_runtime, RunState, Simulation};
pub use surface::DisplaySurface;
