//! Episode domain model
//!
//! An episode moves through `Draft -> Scheduled -> Published`. The scheduled
//! time and the status are kept private so the pairing between them can only
//! change through the transitions below:
//!
//! - `Draft` has no scheduled time
//! - `Scheduled` and `Published` always have one
//! - `Published` is only reachable once the scheduled time has passed

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::id::EpisodeId;

/// Kind of episode
///
/// The kind only changes the label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeKind {
    #[default]
    Regular,
    Bonus,
}

impl EpisodeKind {
    /// Returns the human-readable type label
    pub fn label(&self) -> &'static str {
        match self {
            EpisodeKind::Regular => "Regular",
            EpisodeKind::Bonus => "Bonus",
        }
    }

    /// Infers a kind from a stored label
    ///
    /// Matching is case-insensitive; anything other than "regular" is a bonus episode.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("regular") {
            EpisodeKind::Regular
        } else {
            EpisodeKind::Bonus
        }
    }
}

/// Lifecycle status of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl EpisodeStatus {
    /// Returns the symbolic name used in catalogue files
    pub fn symbol(&self) -> &'static str {
        match self {
            EpisodeStatus::Draft => "DRAFT",
            EpisodeStatus::Scheduled => "SCHEDULED",
            EpisodeStatus::Published => "PUBLISHED",
        }
    }

    /// Parses a symbolic name (exact, case-sensitive)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "DRAFT" => Some(EpisodeStatus::Draft),
            "SCHEDULED" => Some(EpisodeStatus::Scheduled),
            "PUBLISHED" => Some(EpisodeStatus::Published),
            _ => None,
        }
    }

    /// Returns true if the episode has not been scheduled yet
    pub fn is_draft(&self) -> bool {
        matches!(self, EpisodeStatus::Draft)
    }

    /// Returns true if the episode is scheduled but not yet published
    pub fn is_scheduled(&self) -> bool {
        matches!(self, EpisodeStatus::Scheduled)
    }

    /// Returns true if the episode has been published
    pub fn is_published(&self) -> bool {
        matches!(self, EpisodeStatus::Published)
    }
}

/// A podcast episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    id: EpisodeId,

    kind: EpisodeKind,

    /// Human-readable title
    pub title: String,

    /// Running time in minutes
    pub duration_minutes: i32,

    scheduled_at: Option<NaiveDateTime>,

    status: EpisodeStatus,
}

impl Episode {
    /// Creates a draft episode with no scheduled time
    pub fn draft(
        id: EpisodeId,
        kind: EpisodeKind,
        title: impl Into<String>,
        duration_minutes: i32,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            duration_minutes,
            scheduled_at: None,
            status: EpisodeStatus::Draft,
        }
    }

    pub fn id(&self) -> &EpisodeId {
        &self.id
    }

    pub fn kind(&self) -> EpisodeKind {
        self.kind
    }

    /// Returns the label for this episode's kind
    pub fn type_label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        self.scheduled_at
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// Returns true if the episode may be published at `now`
    pub fn can_publish(&self, now: NaiveDateTime) -> bool {
        self.scheduled_at.is_some_and(|at| at <= now)
    }

    /// Publishes the episode if its scheduled time has been reached
    ///
    /// Does nothing when the episode is unscheduled or scheduled in the future.
    /// Returns true if the episode is published after the call.
    pub fn publish(&mut self, now: NaiveDateTime) -> bool {
        if self.can_publish(now) {
            self.status = EpisodeStatus::Published;
        }
        self.status.is_published()
    }

    /// Sets the scheduled time and marks the episode scheduled
    ///
    /// No conflict check happens here; callers own that.
    pub(crate) fn schedule(&mut self, at: NaiveDateTime) {
        self.scheduled_at = Some(at);
        self.status = EpisodeStatus::Scheduled;
    }

    /// Marks a scheduled episode published without looking at the clock
    ///
    /// Used when restoring published episodes from a catalogue file.
    pub(crate) fn force_publish(&mut self) {
        if self.scheduled_at.is_some() {
            self.status = EpisodeStatus::Published;
        }
    }
}
