//! Kalaa command-line tools
//!
//! Headless rendering and inspection of the fire effect, and checks for the
//! menu content file.

pub mod cli;
pub mod commands;
pub mod utils;
