//! Tooling & Integration Layer
//!
//! Command-line front end and text formatting for the virtual file system.

pub mod cli;
pub mod format;

pub use cli::{AgentCommands, Cli, CliContext, Commands};
