//! Reusable UI components

mod resource_bar;
mod status_badge;

pub use resource_bar::ResourceBar;
pub use status_badge::StatusBadge;
