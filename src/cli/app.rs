//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

use super::episode::{self, Catalogue, KindArg};
use super::output::{Output, OutputFormat};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "podcast")]
#[command(author, version, about = "Create, schedule and publish podcast episodes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Episodes file to read and write
    #[arg(long, global = true, env = "PODCAST_EPISODES_FILE")]
    pub file: Option<PathBuf>,

    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an episode, optionally scheduling it right away
    ///
    /// Examples:
    ///   podcast create "My First Episode" --duration 20
    ///   podcast create "Behind the Scenes" -d 10 --kind bonus --at 2025-05-01T11:00
    Create {
        /// Episode title
        title: String,

        /// Running time in minutes
        #[arg(long, short, value_parser = clap::value_parser!(i32).range(1..))]
        duration: i32,

        /// Episode kind (defaults to the configured kind, then regular)
        #[arg(long, short)]
        kind: Option<KindArg>,

        /// Schedule the new episode at this time
        #[arg(long, value_parser = episode::parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// Schedule (or reschedule) an episode
    Schedule {
        /// Episode ID or unique prefix
        id: String,

        /// Time slot, e.g. 2025-05-01T10:00
        #[arg(value_parser = episode::parse_datetime)]
        at: NaiveDateTime,
    },

    /// Publish an episode whose scheduled time has arrived
    Publish {
        /// Episode ID or unique prefix
        id: String,

        /// Treat this as the current time instead of the clock
        #[arg(long, value_parser = episode::parse_datetime)]
        now: Option<NaiveDateTime>,
    },

    /// List all episodes
    List,

    /// Show episode details
    Show {
        /// Episode ID or unique prefix
        id: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli
        .format
        .unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Podcast scheduler starting");
    if let Some(path) = Config::config_path() {
        output.verbose_ctx("config", &format!("Config file: {}", path.display()));
    }

    let path = config.episodes_file(cli.file.as_deref());
    let mut catalogue = Catalogue::open(path, &output)?;

    match cli.command {
        Commands::Create {
            title,
            duration,
            kind,
            at,
        } => {
            let kind = kind.map(Into::into).unwrap_or(config.default_kind);
            output.verbose_ctx(
                "create",
                &format!("kind={:?}, duration={}, at={:?}", kind, duration, at),
            );
            episode::create(&output, &mut catalogue, &title, duration, kind, at)?
        }

        Commands::Schedule { id, at } => {
            output.verbose_ctx("schedule", &format!("Scheduling {} at {}", id, at));
            episode::schedule(&output, &mut catalogue, &id, at)?
        }

        Commands::Publish { id, now } => {
            output.verbose_ctx("publish", &format!("Publishing {}, now override: {:?}", id, now));
            episode::publish(&output, &mut catalogue, &id, now)?
        }

        Commands::List => episode::list(&output, &catalogue),

        Commands::Show { id } => episode::show(&output, &catalogue, &id)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
