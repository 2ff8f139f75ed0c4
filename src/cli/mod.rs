//! Command-line entry points
pub mod commands;
pub mod logging;

pub use commands::{Cli, Commands, GroupBy, PageFormat, run};
