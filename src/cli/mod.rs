//! CLI for soulregistry
//!
//! - init: create the data directory and record log
//! - serve: open the store and run the GraphQL server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
