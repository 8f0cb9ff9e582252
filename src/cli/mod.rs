//! CLI module
//!
//! Command-line host for running a sync.
//!
//! # Commands
//!
//! - `run` - Run a sync for an event and print the matching videos
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, MatchModeArg, OutputFormat, StrategyArg};
pub use runner::Runner;
