//! jobsift CLI library.
//!
//! Configuration loading, command execution and terminal formatting for the
//! `jobsift` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command, ProviderKind};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
