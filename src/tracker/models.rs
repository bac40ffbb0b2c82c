//! Data models for the study tracker

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Color tags a new subject may be given
pub const SUBJECT_COLORS: [&str; 5] = [
    "bg-blue-500",
    "bg-purple-500",
    "bg-emerald-500",
    "bg-rose-500",
    "bg-amber-500",
];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Older saves may carry `"notes": null`
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named grouping that owns zero or more topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Subject {
    pub fn new(name: String) -> Self {
        let color = SUBJECT_COLORS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(SUBJECT_COLORS[0]);
        Self {
            id: new_id(),
            name,
            color: color.to_string(),
        }
    }
}

/// A single trackable learning unit with its own review schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub subject_id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_priority: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    pub last_reviewed: DateTime<Utc>,
    /// Position in the interval ladder
    #[serde(default)]
    pub interval_step: u32,
    pub next_review: DateTime<Utc>,
}

impl Topic {
    /// A fresh topic starts at step 0 and comes due one day after creation
    pub fn new(subject_id: String, title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            subject_id,
            title,
            completed: false,
            is_priority: false,
            notes: String::new(),
            last_reviewed: now,
            interval_step: 0,
            next_review: now + Duration::days(1),
        }
    }

    /// Whether the topic's review date has arrived
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    /// Due and still waiting to be reviewed
    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        self.is_due(now) && !self.completed
    }
}

/// Partial update applied to a topic. Scheduling fields only change through a
/// completion toggle.
#[derive(Debug, Clone, Default)]
pub struct TopicPatch {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub is_priority: Option<bool>,
}

/// Which base set the topic view starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    /// Only topics that are due and not yet completed
    Today,
}

/// Parameters for deriving the visible topic list
#[derive(Debug, Clone, Default)]
pub struct TopicQuery {
    pub mode: FilterMode,
    /// Ignored when `mode` is `Today`
    pub active_subject: Option<String>,
    pub search: String,
}

impl TopicQuery {
    pub fn today() -> Self {
        Self {
            mode: FilterMode::Today,
            ..Default::default()
        }
    }

    pub fn subject(subject_id: impl Into<String>) -> Self {
        Self {
            active_subject: Some(subject_id.into()),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// How topics are spread across the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderStats {
    pub total: usize,
    /// Topics still at step 0
    pub new_topics: usize,
    pub rungs: Vec<RungCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RungCount {
    pub step: u32,
    pub days: i64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_topic_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let topic = Topic::new("s1".to_string(), "Limits".to_string(), now);

        assert_eq!(topic.interval_step, 0);
        assert!(!topic.completed);
        assert!(!topic.is_priority);
        assert_eq!(topic.last_reviewed, now);
        assert_eq!(topic.next_review, now + Duration::days(1));
        assert!(!topic.is_due(now));
    }

    #[test]
    fn test_subject_gets_palette_color() {
        let subject = Subject::new("Math".to_string());
        assert!(SUBJECT_COLORS.contains(&subject.color.as_str()));
        assert!(!subject.id.is_empty());
    }

    #[test]
    fn test_topic_reads_persisted_layout() {
        let json = r#"{
            "id": "1712345678901",
            "subjectId": "1712345000000",
            "title": "Limits",
            "completed": true,
            "isPriority": false,
            "notes": null,
            "lastReviewed": "2026-03-01T09:00:00.000Z",
            "intervalStep": 2,
            "nextReview": "2026-03-04T09:00:00.000Z"
        }"#;

        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.subject_id, "1712345000000");
        assert_eq!(topic.interval_step, 2);
        assert!(topic.completed);
        assert_eq!(topic.notes, "");
        assert_eq!(
            topic.next_review,
            Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap()
        );

        let value = serde_json::to_value(&topic).unwrap();
        assert!(value.get("isPriority").is_some());
        assert!(value.get("intervalStep").is_some());
    }
}
