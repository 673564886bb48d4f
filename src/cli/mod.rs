//! # Command-Line Interface
//!
//! A thin shell over [`EpisodeRepository`](crate::storage::EpisodeRepository).
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `create` | Create an episode, optionally scheduling it (`--at`) |
//! | `schedule` | Schedule or reschedule an episode |
//! | `publish` | Publish an episode whose time has come |
//! | `list` | List all episodes in file order |
//! | `show` | Show one episode |
//!
//! Episodes are addressed by ID or any unique ID prefix.
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! podcast --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod episode;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
