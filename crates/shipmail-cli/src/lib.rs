//! Shipmail CLI library.
//!
//! Configuration loading, the `extract` and `evaluate` commands, and
//! terminal output for the `shipmail` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
