//! CLI commands and argument parsing

use crate::config::PaginationStrategy;
use crate::matcher::MatchMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sync a user's tagged public videos from a video API
#[derive(Parser, Debug)]
#[command(name = "video-tag-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a sync for an event (read from stdin when no event is given)
    Run {
        /// Event file (JSON)
        #[arg(short, long, conflicts_with = "event_json")]
        event: Option<PathBuf>,

        /// Inline event JSON
        #[arg(long)]
        event_json: Option<String>,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Override the pagination strategy
        #[arg(long)]
        strategy: Option<StrategyArg>,

        /// Override the tag match mode
        #[arg(long)]
        match_mode: Option<MatchModeArg>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON array
    Json,
    /// Indented JSON array
    Pretty,
}

/// Pagination strategy flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    /// Concurrent fetches sized by the reported total
    PageCount,
    /// Sequential fetches following the next-page link
    NextUrl,
}

impl From<StrategyArg> for PaginationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::PageCount => PaginationStrategy::PageCount,
            StrategyArg::NextUrl => PaginationStrategy::NextUrl,
        }
    }
}

/// Tag match mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MatchModeArg {
    Exact,
    Substring,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Exact => MatchMode::Exact,
            MatchModeArg::Substring => MatchMode::Substring,
        }
    }
}
