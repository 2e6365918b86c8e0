//! Window panels

pub mod console;
pub mod controls;
pub mod status;
