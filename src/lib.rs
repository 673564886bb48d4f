//! Podcast Scheduler - create, schedule and publish podcast episodes
//!
//! Episodes live in a flat, pipe-delimited catalogue file. The
//! [`EpisodeRepository`] owns them in memory, refuses to double-book a time
//! slot, and only publishes episodes whose scheduled time has passed.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Episode, EpisodeId, EpisodeKind, EpisodeStatus, ScheduleError};
pub use storage::{EpisodeRepository, PersistenceError};
