//! CLI commands

pub mod check;
pub mod sync;
pub mod utils;
