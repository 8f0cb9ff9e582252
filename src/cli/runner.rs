//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, MatchModeArg, OutputFormat, StrategyArg};
use crate::config::SyncConfig;
use crate::engine::SyncEngine;
use crate::error::{Result, ResultExt};
use crate::event::Event;
use crate::types::Video;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                event,
                event_json,
                base_url,
                strategy,
                match_mode,
                format,
            } => {
                let config =
                    self.effective_config(base_url.as_deref(), *strategy, *match_mode)?;
                let event = read_event(event.as_deref(), event_json.as_deref())?;
                self.sync(config, &event, *format).await
            }
            Commands::Config => {
                let config = self.effective_config(None, None, None)?;
                print!("{}", config.to_yaml()?);
                Ok(())
            }
        }
    }

    /// Load the config file (if any) and apply command-line overrides
    fn effective_config(
        &self,
        base_url: Option<&str>,
        strategy: Option<StrategyArg>,
        match_mode: Option<MatchModeArg>,
    ) -> Result<SyncConfig> {
        let mut config = match &self.cli.config {
            Some(path) => SyncConfig::from_file(path)?,
            None => SyncConfig::default(),
        };

        if let Some(url) = base_url {
            config.base_url = url.to_string();
        }
        if let Some(strategy) = strategy {
            config.strategy = strategy.into();
        }
        if let Some(mode) = match_mode {
            config.match_mode = mode.into();
        }

        config.validate()?;
        Ok(config)
    }

    async fn sync(&self, config: SyncConfig, event: &Event, format: OutputFormat) -> Result<()> {
        let mut engine = SyncEngine::new(config)?;
        let videos = engine.run(event).await?;

        let stats = engine.stats();
        info!(
            "{} videos matched ({} pages, {} videos read)",
            stats.videos_matched, stats.pages_fetched, stats.videos_seen
        );

        println!("{}", render(&videos, format)?);
        Ok(())
    }
}

/// Read the event from a file, inline JSON, or stdin
fn read_event(path: Option<&Path>, json: Option<&str>) -> Result<Event> {
    let raw = match (path, json) {
        (_, Some(json)) => json.to_string(),
        (Some(path), None) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
    };
    Event::from_json(&raw)
}

/// Render matched videos for output
fn render(videos: &[Video], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(videos)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(videos)?,
    };
    Ok(rendered)
}
