//! Episode identifiers
//!
//! Fresh IDs are random v4 UUIDs (e.g. `3f2b4c1e-9d3e-4f52-a1b0-7c6d5e4f3a21`).
//! IDs read back from a catalogue file are kept verbatim, whatever their shape,
//! so files written by other tools survive a load/save cycle unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the abbreviated form shown in listings
const SHORT_LEN: usize = 8;

/// Opaque, immutable episode identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    /// Generates a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier without validating its shape
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated form used in tables
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }

    /// Returns true if the identifier begins with `prefix`
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.starts_with(prefix)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EpisodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EpisodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for EpisodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = EpisodeId::generate();
        let b = EpisodeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_id_is_a_uuid() {
        let id = EpisodeId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn existing_ids_are_kept_verbatim() {
        let id = EpisodeId::new("legacy-42");
        assert_eq!(id.as_str(), "legacy-42");
        assert_eq!(id.to_string(), "legacy-42");
    }

    #[test]
    fn short_form() {
        let id = EpisodeId::new("3f2b4c1e-9d3e-4f52-a1b0-7c6d5e4f3a21");
        assert_eq!(id.short(), "3f2b4c1e");

        let tiny = EpisodeId::new("ep1");
        assert_eq!(tiny.short(), "ep1");
    }

    #[test]
    fn prefix_matching() {
        let id = EpisodeId::new("3f2b4c1e-9d3e");
        assert!(id.matches_prefix("3f2b"));
        assert!(id.matches_prefix("3f2b4c1e-9d3e"));
        assert!(!id.matches_prefix("4f"));
        assert!(!id.matches_prefix(""));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EpisodeId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
