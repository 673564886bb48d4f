//! # Storage Layer
//!
//! Persistence and configuration for the podcast scheduler.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Episodes | Pipe-delimited lines | `episodes.txt` (or `--file`) |
//! | Config | TOML | `<config dir>/podcast-scheduler/config.toml` |
//!
//! ## Catalogue Format
//!
//! ```text
//! 3f2b4c1e-...|Regular|My First Episode|20|SCHEDULED|2025-05-01T10:00:00
//! 9d3e5f2a-...|Bonus|Behind the Scenes|10|DRAFT|
//! ```
//!
//! ## Concurrency
//!
//! None. Saves rewrite the file in place and are not atomic, and nothing
//! locks the file between a load and the following save.
//!
//! ## Key Types
//!
//! - [`EpisodeRepository`] - Owns the episodes; create, schedule, publish, save, load
//! - [`codec`] - Serializes episodes to and from the catalogue format
//! - [`Config`] - User configuration

pub mod codec;
mod config;
mod repository;

pub use codec::CodecError;
pub use config::{Config, ConfigError, OutputFormat, CONFIG_ENV, DEFAULT_EPISODES_FILE};
pub use repository::{EpisodeRepository, PersistenceError};
