//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ExportArgs, InspectArgs};
pub use commands::{execute_export, execute_inspect};
