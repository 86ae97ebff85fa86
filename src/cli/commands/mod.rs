//! CLI subcommand implementations.

pub mod dispatcher;
pub mod doctor;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
