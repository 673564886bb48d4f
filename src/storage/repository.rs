//! Episode repository
//!
//! Owns the ordered episode collection and is the single entry point for
//! creating, scheduling, publishing, saving and loading episodes.
//!
//! The repository is single-caller: the conflict check in
//! [`EpisodeRepository::schedule_episode`] reads the collection and then
//! mutates it with no lock in between. Sharing one repository between threads
//! needs a single mutex around each call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use super::codec::{self, CodecError};
use crate::domain::{check_slot, Episode, EpisodeId, EpisodeKind, ScheduleError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to save episodes to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read episodes from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load episodes from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// In-memory episode collection, kept in insertion order
#[derive(Debug, Default)]
pub struct EpisodeRepository {
    episodes: Vec<Episode>,
}

impl EpisodeRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft episode with a fresh ID and appends it
    ///
    /// Title and duration are taken as given; validation belongs to callers.
    pub fn create_episode(
        &mut self,
        kind: EpisodeKind,
        title: impl Into<String>,
        duration_minutes: i32,
    ) -> &Episode {
        let episode = Episode::draft(EpisodeId::generate(), kind, title, duration_minutes);
        self.episodes.push(episode);
        &self.episodes[self.episodes.len() - 1]
    }

    /// Schedules an episode at `at`
    ///
    /// Fails with [`ScheduleError::Conflict`] if another episode already holds
    /// exactly that time, leaving every episode untouched. Rescheduling an
    /// episode to a new time (or its current one) is allowed.
    pub fn schedule_episode(
        &mut self,
        id: &EpisodeId,
        at: NaiveDateTime,
    ) -> Result<(), ScheduleError> {
        let index = self
            .position(id)
            .ok_or_else(|| ScheduleError::NotFound(id.clone()))?;

        check_slot(&self.episodes, id, at)?;

        self.episodes[index].schedule(at);
        Ok(())
    }

    /// Publishes an episode if its scheduled time is at or before `now`
    ///
    /// Unscheduled episodes, episodes scheduled after `now`, and unknown IDs
    /// are left alone without error.
    pub fn publish_episode(&mut self, id: &EpisodeId, now: NaiveDateTime) {
        if let Some(episode) = self.get_mut(id) {
            episode.publish(now);
        }
    }

    /// Returns every episode in insertion order
    pub fn list_episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Looks up an episode by ID
    pub fn get(&self, id: &EpisodeId) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id() == id)
    }

    /// Looks up an episode by ID for editing its title or duration
    pub fn get_mut(&mut self, id: &EpisodeId) -> Option<&mut Episode> {
        self.episodes.iter_mut().find(|e| e.id() == id)
    }

    /// Finds the episodes whose ID starts with `prefix`
    ///
    /// An exact ID match wins over longer IDs sharing the prefix.
    pub fn resolve(&self, prefix: &str) -> Vec<&Episode> {
        if let Some(exact) = self.episodes.iter().find(|e| e.id().as_str() == prefix) {
            return vec![exact];
        }

        self.episodes
            .iter()
            .filter(|e| e.id().matches_prefix(prefix))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Writes every episode to `path`, replacing its contents
    ///
    /// The write is not atomic; a crash part-way through can leave a truncated file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();

        fs::write(path, codec::serialize(&self.episodes)).map_err(|source| {
            PersistenceError::Write {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Replaces the collection with the episodes stored at `path`
    ///
    /// The collection is cleared before reading, so a failed load leaves the
    /// repository empty rather than restoring its previous contents.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        self.episodes.clear();

        let text = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.episodes = codec::deserialize(&text).map_err(|source| PersistenceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    fn position(&self, id: &EpisodeId) -> Option<usize> {
        self.episodes.iter().position(|e| e.id() == id)
    }
}
