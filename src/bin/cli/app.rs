use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use studyloop_lib::tracker::{ReviewObserver, Subject, Topic, Tracker};
use studyloop_lib::{Config, JsonFileStorage, SystemClock};

use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Prints a line when a due review is finished
struct Celebration {
    use_color: bool,
}

impl ReviewObserver for Celebration {
    fn due_review_completed(&self, topic: &Topic) {
        println!(
            "{}",
            paint(
                &format!("\u{1f389} Reviewed \"{}\" right on schedule!", topic.title),
                Color::MAGENTA,
                self.use_color,
            )
        );
    }
}

/// Shared application state for CLI commands
pub struct App {
    pub tracker: Tracker,
    pub data_dir: PathBuf,
}

impl App {
    pub fn new(
        data_dir: Option<PathBuf>,
        config_path: Option<&Path>,
        format: &OutputFormat,
        use_color: bool,
    ) -> Result<Self> {
        let config = match config_path.map(Path::to_path_buf).or_else(Config::default_path) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };

        let data_dir = match data_dir.or(config.data_dir.clone()) {
            Some(dir) => dir,
            None => JsonFileStorage::default_data_dir().context("Failed to get data directory")?,
        };
        log::debug!("Using data directory {:?}", data_dir);

        let storage = JsonFileStorage::new(data_dir.clone());
        let mut tracker = Tracker::open(Box::new(storage), Box::new(SystemClock))
            .with_context(|| format!("Failed to load study data from {}", data_dir.display()))?;

        // JSON output stays machine-readable
        if config.celebrate && matches!(format, OutputFormat::Plain) {
            tracker = tracker.with_observer(Box::new(Celebration { use_color }));
        }

        Ok(Self { tracker, data_dir })
    }

    /// Find a subject by name (case-insensitive prefix match)
    pub fn find_subject(&self, name: &str) -> Result<Subject> {
        let subjects = self.tracker.subjects();
        let name_lower = name.to_lowercase();

        // Exact match first
        if let Some(s) = subjects.iter().find(|s| s.name.to_lowercase() == name_lower) {
            return Ok(s.clone());
        }

        // Prefix match
        let matches: Vec<&Subject> = subjects.iter()
            .filter(|s| s.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!("No subject matching '{}'. Available subjects:\n{}", name,
                subjects.iter().map(|s| format!("  - {}", s.name)).collect::<Vec<_>>().join("\n")),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous subject name '{}'. Matches:\n{}", name,
                matches.iter().map(|s| format!("  - {}", s.name)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Find a topic by id, or by title (case-insensitive prefix match)
    pub fn find_topic(&self, query: &str) -> Result<Topic> {
        match_topic(self.tracker.topics(), query)
    }

    /// Subject name for a topic, or "?" if it is gone
    pub fn subject_name(&self, subject_id: &str) -> String {
        self.tracker.subjects().iter()
            .find(|s| s.id == subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "?".to_string())
    }
}

fn list_topics(topics: &[&Topic]) -> String {
    topics.iter().map(|t| format!("  - {} ({})", t.title, t.id)).collect::<Vec<_>>().join("\n")
}

/// Resolve a topic query. Ids win, then exact titles, then title prefixes.
/// A title shared by several topics is ambiguous and must be given by id.
fn match_topic(topics: &[Topic], query: &str) -> Result<Topic> {
    if let Some(t) = topics.iter().find(|t| t.id == query) {
        return Ok(t.clone());
    }

    let query_lower = query.to_lowercase();
    let exact: Vec<&Topic> = topics.iter()
        .filter(|t| t.title.to_lowercase() == query_lower)
        .collect();

    match exact.len() {
        0 => {}
        1 => return Ok(exact[0].clone()),
        _ => bail!("Ambiguous topic title '{}'. Use an id:\n{}", query, list_topics(&exact)),
    }

    let matches: Vec<&Topic> = topics.iter()
        .filter(|t| t.title.to_lowercase().starts_with(&query_lower))
        .collect();

    match matches.len() {
        0 => bail!("No topic matching '{}'", query),
        1 => Ok(matches[0].clone()),
        _ => bail!("Ambiguous topic title '{}'. Matches:\n{}", query, list_topics(&matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn shared_title_topics() -> Vec<Topic> {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let math = Subject::new("Math".to_string());
        let physics = Subject::new("Physics".to_string());
        vec![
            Topic::new(math.id.clone(), "Limits".to_string(), now),
            Topic::new(physics.id.clone(), "Limits".to_string(), now),
            Topic::new(math.id, "Derivatives".to_string(), now),
        ]
    }

    #[test]
    fn test_shared_exact_title_is_ambiguous() {
        let topics = shared_title_topics();
        let err = match_topic(&topics, "limits").unwrap_err().to_string();
        assert!(err.contains("Ambiguous"));
        assert!(err.contains(&topics[0].id));
        assert!(err.contains(&topics[1].id));
    }

    #[test]
    fn test_id_resolves_shared_title() {
        let topics = shared_title_topics();
        let found = match_topic(&topics, &topics[1].id).unwrap();
        assert_eq!(found.subject_id, topics[1].subject_id);
    }

    #[test]
    fn test_unique_title_and_prefix_resolve() {
        let topics = shared_title_topics();
        assert_eq!(match_topic(&topics, "DERIVATIVES").unwrap().id, topics[2].id);
        assert_eq!(match_topic(&topics, "deriv").unwrap().id, topics[2].id);
        assert!(match_topic(&topics, "integrals").is_err());
    }
}
