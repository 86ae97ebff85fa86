//! Command-line interface.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DoctorArgs, ListArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
