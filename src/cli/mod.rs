//! CLI module
//!
//! Command-line interface for running extractions.
//!
//! # Commands
//!
//! - `check` - Test the token against the API
//! - `streams` - List the available streams
//! - `read` - Extract records from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
