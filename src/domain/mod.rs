//! Domain models for the podcast scheduler
//!
//! Contains the episode lifecycle and scheduling rules without any I/O concerns.

mod id;
mod episode;
mod schedule;

pub use id::EpisodeId;
pub use episode::{Episode, EpisodeKind, EpisodeStatus};
pub use schedule::{check_slot, find_conflict, ScheduleError};
