//! Command implementations

pub mod fire;
pub mod menu;
