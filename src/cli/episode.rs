//! Episode CLI commands
//!
//! Every command loads the catalogue, runs one repository operation and
//! saves the catalogue again if anything changed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

use super::output::Output;
use crate::domain::{Episode, EpisodeId, EpisodeKind};
use crate::storage::codec::{format_timestamp, parse_timestamp};
use crate::storage::EpisodeRepository;

/// Episode kind as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    Regular,
    Bonus,
}

impl From<KindArg> for EpisodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Regular => EpisodeKind::Regular,
            KindArg::Bonus => EpisodeKind::Bonus,
        }
    }
}

/// Parses a date-time argument
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` and the same with a space instead of `T`.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    let normalized = value.trim().replacen(' ', "T", 1);
    parse_timestamp(&normalized).map_err(|_| {
        format!(
            "invalid date-time '{}': expected YYYY-MM-DDTHH:MM[:SS]",
            value
        )
    })
}

/// The repository together with the file it was loaded from
pub struct Catalogue {
    path: PathBuf,
    repo: EpisodeRepository,
}

impl Catalogue {
    /// Loads the catalogue at `path`; a missing file is an empty catalogue
    pub fn open(path: PathBuf, output: &Output) -> Result<Self> {
        let mut repo = EpisodeRepository::new();

        if path.exists() {
            repo.load_from_file(&path)?;
            output.verbose_ctx(
                "storage",
                &format!("Loaded {} episode(s) from {}", repo.len(), path.display()),
            );
        } else {
            output.verbose_ctx(
                "storage",
                &format!("No episodes file at {}, starting empty", path.display()),
            );
        }

        Ok(Self { path, repo })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the catalogue back to its file
    pub fn save(&self, output: &Output) -> Result<()> {
        self.repo.save_to_file(&self.path)?;
        output.verbose_ctx(
            "storage",
            &format!(
                "Saved {} episode(s) to {}",
                self.repo.len(),
                self.path.display()
            ),
        );
        Ok(())
    }

    /// Resolves an ID or unique ID prefix
    pub fn resolve(&self, prefix: &str) -> Result<EpisodeId> {
        match self.repo.resolve(prefix).as_slice() {
            [] => anyhow::bail!("Episode not found: {}", prefix),
            [episode] => Ok(episode.id().clone()),
            matches => anyhow::bail!(
                "Ambiguous episode ID '{}' matches {} episodes",
                prefix,
                matches.len()
            ),
        }
    }

    fn episode(&self, id: &EpisodeId) -> Result<&Episode> {
        self.repo
            .get(id)
            .with_context(|| format!("Episode not found: {}", id))
    }
}

fn scheduled_text(episode: &Episode) -> String {
    episode
        .scheduled_at()
        .map(format_timestamp)
        .unwrap_or_else(|| "-".to_string())
}

fn episode_json(episode: &Episode) -> serde_json::Value {
    serde_json::json!({
        "id": episode.id().as_str(),
        "kind": episode.kind(),
        "type_label": episode.type_label(),
        "title": episode.title,
        "duration_minutes": episode.duration_minutes,
        "status": episode.status(),
        "scheduled_at": episode.scheduled_at().map(format_timestamp),
    })
}

pub fn create(
    output: &Output,
    catalogue: &mut Catalogue,
    title: &str,
    duration: i32,
    kind: EpisodeKind,
    at: Option<NaiveDateTime>,
) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title must not be empty");
    }
    if title.contains(['|', '\n', '\r']) {
        anyhow::bail!("Title must not contain '|' or line breaks");
    }

    let id = catalogue
        .repo
        .create_episode(kind, title, duration)
        .id()
        .clone();
    output.verbose_ctx("create", &format!("Created draft {}", id));

    let scheduled = match at {
        Some(at) => catalogue.repo.schedule_episode(&id, at),
        None => Ok(()),
    };

    // The draft is kept even when the requested slot is taken
    catalogue.save(output)?;
    scheduled.with_context(|| format!("Created episode {} as a draft", id.short()))?;

    let episode = catalogue.episode(&id)?;
    if output.is_json() {
        output.data(&episode_json(episode));
    } else {
        output.success(&format!(
            "Created {} episode: {} - {}",
            episode.type_label(),
            episode.id().short(),
            episode.title
        ));
        if let Some(at) = episode.scheduled_at() {
            output.success(&format!("Scheduled for {}", format_timestamp(at)));
        }
    }

    Ok(())
}

pub fn schedule(
    output: &Output,
    catalogue: &mut Catalogue,
    prefix: &str,
    at: NaiveDateTime,
) -> Result<()> {
    let id = catalogue.resolve(prefix)?;

    catalogue.repo.schedule_episode(&id, at)?;
    catalogue.save(output)?;

    let episode = catalogue.episode(&id)?;
    if output.is_json() {
        output.data(&episode_json(episode));
    } else {
        output.success(&format!(
            "Scheduled episode {} for {}",
            episode.id().short(),
            format_timestamp(at)
        ));
    }

    Ok(())
}

pub fn publish(
    output: &Output,
    catalogue: &mut Catalogue,
    prefix: &str,
    now: Option<NaiveDateTime>,
) -> Result<()> {
    let id = catalogue.resolve(prefix)?;
    let now = now.unwrap_or_else(|| Local::now().naive_local());

    let before = catalogue.episode(&id)?.status();
    catalogue.repo.publish_episode(&id, now);
    let episode = catalogue.episode(&id)?;
    let after = episode.status();

    if before != after {
        catalogue.save(output)?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": episode.id().as_str(),
            "published": after.is_published(),
            "status": after,
            "scheduled_at": episode.scheduled_at().map(format_timestamp),
        }));
    } else if after.is_published() {
        output.success(&format!("Published episode {}", episode.id().short()));
    } else {
        match episode.scheduled_at() {
            Some(at) => println!(
                "Episode {} is not due yet (scheduled for {})",
                episode.id().short(),
                format_timestamp(at)
            ),
            None => println!(
                "Episode {} is not scheduled; schedule it before publishing",
                episode.id().short()
            ),
        }
    }

    Ok(())
}

pub fn list(output: &Output, catalogue: &Catalogue) {
    let episodes = catalogue.repo.list_episodes();

    if output.is_json() {
        let items: Vec<_> = episodes.iter().map(episode_json).collect();
        output.data(&items);
        return;
    }

    if episodes.is_empty() {
        println!("No episodes in {}", catalogue.path().display());
        return;
    }

    println!(
        "{:<10} {:<8} {:<10} {:<20} {:>8}  TITLE",
        "ID", "TYPE", "STATUS", "SCHEDULED", "MINUTES"
    );
    println!("{}", "-".repeat(80));

    for episode in episodes {
        println!(
            "{:<10} {:<8} {:<10} {:<20} {:>8}  {}",
            episode.id().short(),
            episode.type_label(),
            episode.status().symbol(),
            scheduled_text(episode),
            episode.duration_minutes,
            episode.title
        );
    }

    println!();
    println!("{} episode(s)", episodes.len());
}

pub fn show(output: &Output, catalogue: &Catalogue, prefix: &str) -> Result<()> {
    let id = catalogue.resolve(prefix)?;
    let episode = catalogue.episode(&id)?;

    if output.is_json() {
        output.data(&episode_json(episode));
    } else {
        println!("ID:        {}", episode.id());
        println!("Title:     {}", episode.title);
        println!("Type:      {}", episode.type_label());
        println!("Duration:  {} min", episode.duration_minutes);
        println!("Status:    {}", episode.status().symbol());
        println!("Scheduled: {}", scheduled_text(episode));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Json, false)
    }

    #[test]
    fn parse_datetime_forms() {
        assert_eq!(parse_datetime("2025-05-01T10:00:00"), Ok(at(10, 0)));
        assert_eq!(parse_datetime("2025-05-01T10:00"), Ok(at(10, 0)));
        assert_eq!(parse_datetime("2025-05-01 10:00"), Ok(at(10, 0)));
        assert_eq!(parse_datetime(" 2025-05-01 10:30:00 "), Ok(at(10, 30)));
        assert!(parse_datetime("May 1st").is_err());
        assert!(parse_datetime("2025-05-01").is_err());
    }

    #[test]
    fn open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalogue = Catalogue::open(dir.path().join("episodes.txt"), &quiet()).unwrap();

        assert!(catalogue.repo.is_empty());
    }

    #[test]
    fn open_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("episodes.txt");
        std::fs::write(&path, "e1|Regular|Bad|abc|DRAFT|\n").unwrap();

        assert!(Catalogue::open(path, &quiet()).is_err());
    }

    #[test]
    fn create_with_taken_slot_keeps_draft() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("episodes.txt");
        let output = quiet();
        let mut catalogue = Catalogue::open(path.clone(), &output).unwrap();

        create(&output, &mut catalogue, "First", 20, EpisodeKind::Regular, Some(at(10, 0))).unwrap();
        let err = create(&output, &mut catalogue, "Second", 10, EpisodeKind::Bonus, Some(at(10, 0)))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("already scheduled"));

        let reopened = Catalogue::open(path, &output).unwrap();
        let episodes = reopened.repo.list_episodes();
        assert_eq!(episodes.len(), 2);
        assert!(episodes[1].status().is_draft());
    }

    #[test]
    fn create_rejects_blank_title() {
        let dir = TempDir::new().unwrap();
        let output = quiet();
        let mut catalogue = Catalogue::open(dir.path().join("episodes.txt"), &output).unwrap();

        assert!(create(&output, &mut catalogue, "   ", 20, EpisodeKind::Regular, None).is_err());
        assert!(catalogue.repo.is_empty());
    }

    #[test]
    fn create_rejects_titles_that_break_the_file_format() {
        let dir = TempDir::new().unwrap();
        let output = quiet();
        let mut catalogue = Catalogue::open(dir.path().join("episodes.txt"), &output).unwrap();

        for title in ["Q|A", "Line1\nLine2", "Line1\r\nLine2", "Trailing\r"] {
            let err = create(&output, &mut catalogue, title, 5, EpisodeKind::Regular, None)
                .unwrap_err();
            assert!(err.to_string().contains("line breaks"));
        }
        assert!(catalogue.repo.is_empty());
        assert!(!catalogue.path().exists());
    }

    #[test]
    fn resolve_ambiguous_and_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("episodes.txt");
        std::fs::write(&path, "ab1|Regular|A|1|DRAFT|\nab2|Regular|B|1|DRAFT|\n").unwrap();
        let catalogue = Catalogue::open(path, &quiet()).unwrap();

        assert!(catalogue.resolve("ab").is_err());
        assert!(catalogue.resolve("zz").is_err());
        assert_eq!(catalogue.resolve("ab2").unwrap().as_str(), "ab2");
    }

    #[test]
    fn episode_json_shape() {
        let path = std::path::PathBuf::from("unused.txt");
        let mut catalogue = Catalogue {
            path,
            repo: EpisodeRepository::new(),
        };
        let id = catalogue
            .repo
            .create_episode(EpisodeKind::Bonus, "Extra", 5)
            .id()
            .clone();

        let json = episode_json(catalogue.episode(&id).unwrap());
        assert_eq!(json["kind"], "bonus");
        assert_eq!(json["type_label"], "Bonus");
        assert_eq!(json["status"], "draft");
        assert!(json["scheduled_at"].is_null());

        catalogue.repo.schedule_episode(&id, at(10, 0)).unwrap();
        let json = episode_json(catalogue.episode(&id).unwrap());
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["scheduled_at"], "2025-05-01T10:00:00");
    }

    #[test]
    fn publish_not_due_does_not_fail() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("episodes.txt");
        std::fs::write(&path, "e1|Regular|Later|20|SCHEDULED|2025-05-01T10:00:00\n").unwrap();
        let output = quiet();
        let mut catalogue = Catalogue::open(path.clone(), &output).unwrap();

        publish(&output, &mut catalogue, "e1", Some(at(9, 0))).unwrap();
        assert!(catalogue.repo.list_episodes()[0].status().is_scheduled());

        publish(&output, &mut catalogue, "e1", Some(at(10, 0))).unwrap();
        let reopened = Catalogue::open(path, &output).unwrap();
        assert!(reopened.repo.list_episodes()[0].status().is_published());
    }
}
