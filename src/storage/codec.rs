//! Pipe-delimited catalogue format
//!
//! One episode per line, six fields:
//!
//! ```text
//! <id>|<TypeLabel>|<title>|<durationMinutes>|<STATUS>|<scheduledAt-or-empty>
//! ```
//!
//! There is no header and no escaping; a `|` inside a title shifts the
//! remaining fields and corrupts that record.
//!
//! Reading is deliberately uneven: a line with fewer than six fields is
//! dropped, but a bad duration, timestamp or status aborts the whole read.

use std::fmt::Write as _;
use std::num::ParseIntError;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{Episode, EpisodeId, EpisodeKind, EpisodeStatus};

const DELIMITER: char = '|';
const FIELD_COUNT: usize = 6;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const MINUTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("line {line}: invalid duration '{value}'")]
    InvalidDuration {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: invalid scheduled time '{value}'")]
    InvalidTimestamp {
        line: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("line {line}: unknown status '{value}'")]
    UnknownStatus { line: usize, value: String },
}

/// Formats a timestamp the way it is stored
///
/// Fractional seconds are only written when present.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp
///
/// Accepts `YYYY-MM-DDTHH:MM:SS[.fff]` and the minute-precision form
/// `YYYY-MM-DDTHH:MM` found in older files.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|err| NaiveDateTime::parse_from_str(value, MINUTE_TIMESTAMP_FORMAT).map_err(|_| err))
}

/// Serializes episodes in order, one line each
pub fn serialize(episodes: &[Episode]) -> String {
    let mut out = String::new();

    for episode in episodes {
        let scheduled = episode
            .scheduled_at()
            .map(format_timestamp)
            .unwrap_or_default();

        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{}|{}|{}|{}|{}|{}",
            episode.id(),
            episode.type_label(),
            episode.title,
            episode.duration_minutes,
            episode.status().symbol(),
            scheduled
        );
    }

    out
}

/// Parses a catalogue back into episodes, preserving line order
///
/// Stored scheduled times are applied directly; duplicates are not checked.
/// A stored `PUBLISHED` status is restored as published without consulting
/// the clock.
pub fn deserialize(text: &str) -> Result<Vec<Episode>, CodecError> {
    let mut episodes = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_num = index + 1;
        let fields: Vec<&str> = line.split(DELIMITER).collect();

        if fields.len() < FIELD_COUNT {
            continue;
        }

        episodes.push(parse_record(line_num, &fields)?);
    }

    Ok(episodes)
}

fn parse_record(line: usize, fields: &[&str]) -> Result<Episode, CodecError> {
    let id = fields[0];
    let label = fields[1];
    let title = fields[2];
    let duration = fields[3];
    let status = fields[4];
    let scheduled = fields[5];

    let duration_minutes: i32 = duration.parse().map_err(|source| CodecError::InvalidDuration {
        line,
        value: duration.to_string(),
        source,
    })?;

    let status = EpisodeStatus::from_symbol(status).ok_or_else(|| CodecError::UnknownStatus {
        line,
        value: status.to_string(),
    })?;

    let scheduled_at = if scheduled.is_empty() {
        None
    } else {
        Some(
            parse_timestamp(scheduled).map_err(|source| CodecError::InvalidTimestamp {
                line,
                value: scheduled.to_string(),
                source,
            })?,
        )
    };

    let mut episode = Episode::draft(
        EpisodeId::new(id),
        EpisodeKind::from_label(label),
        title,
        duration_minutes,
    );

    if let Some(at) = scheduled_at {
        episode.schedule(at);
    }

    if status.is_published() {
        episode.force_publish();
    }

    Ok(episode)
}
