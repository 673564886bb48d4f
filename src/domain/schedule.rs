//! Scheduling rules
//!
//! No two episodes may hold the same scheduled time. Collisions are exact
//! timestamp equality; durations are not considered, so episodes one second
//! apart never conflict.

use chrono::NaiveDateTime;
use thiserror::Error;

use super::episode::Episode;
use super::id::EpisodeId;

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Another episode is already scheduled at {at}: {holder}")]
    Conflict { at: NaiveDateTime, holder: EpisodeId },

    #[error("Episode not found: {0}")]
    NotFound(EpisodeId),
}

/// Finds an episode other than `candidate` that already holds `at`
///
/// The candidate's own scheduled time is ignored, so an episode can be moved
/// to a new slot (or kept in its current one) without conflicting with itself.
pub fn find_conflict<'a>(
    episodes: &'a [Episode],
    candidate: &EpisodeId,
    at: NaiveDateTime,
) -> Option<&'a Episode> {
    episodes
        .iter()
        .filter(|e| e.id() != candidate)
        .find(|e| e.scheduled_at() == Some(at))
}

/// Checks that `candidate` may take the slot `at`
pub fn check_slot(
    episodes: &[Episode],
    candidate: &EpisodeId,
    at: NaiveDateTime,
) -> Result<(), ScheduleError> {
    match find_conflict(episodes, candidate, at) {
        Some(holder) => Err(ScheduleError::Conflict {
            at,
            holder: holder.id().clone(),
        }),
        None => Ok(()),
    }
}
