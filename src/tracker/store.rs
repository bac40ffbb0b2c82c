//! In-memory subject and topic collections
//!
//! Every mutation builds a new snapshot and swaps it in whole, so a reader
//! holding an `Arc<Snapshot>` never sees a half-applied change. Invalid input
//! and unknown ids are no-ops reported through the return value, never errors.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::models::{Subject, Topic, TopicPatch};
use super::scheduler::{toggle_review, ReviewResult};
use super::sweep::reset_overdue;

/// One consistent view of both collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub subjects: Vec<Subject>,
    pub topics: Vec<Topic>,
}

impl Snapshot {
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }
}

/// Owner of the subject and topic collections
#[derive(Debug, Default)]
pub struct TopicStore {
    state: Arc<Snapshot>,
}

impl TopicStore {
    pub fn new(subjects: Vec<Subject>, topics: Vec<Topic>) -> Self {
        Self {
            state: Arc::new(Snapshot { subjects, topics }),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.state.subjects
    }

    pub fn topics(&self) -> &[Topic] {
        &self.state.topics
    }

    /// Copy the current snapshot, edit the copy, and swap it in
    fn replace<R>(&mut self, edit: impl FnOnce(&mut Snapshot) -> R) -> R {
        let mut next = Snapshot::clone(&self.state);
        let out = edit(&mut next);
        self.state = Arc::new(next);
        out
    }

    // ===== Subject Operations =====

    /// Add a subject. Blank names are rejected.
    pub fn add_subject(&mut self, name: &str) -> Option<Subject> {
        if name.trim().is_empty() {
            return None;
        }
        let subject = Subject::new(name.to_string());
        self.replace(|s| s.subjects.push(subject.clone()));
        Some(subject)
    }

    /// Delete a subject together with all of its topics in one swap.
    /// Returns the number of topics removed, or `None` for an unknown subject.
    pub fn delete_subject(&mut self, id: &str) -> Option<usize> {
        self.state.subject(id)?;
        let removed = self.replace(|s| {
            s.subjects.retain(|subject| subject.id != id);
            let before = s.topics.len();
            s.topics.retain(|topic| topic.subject_id != id);
            before - s.topics.len()
        });
        Some(removed)
    }

    // ===== Topic Operations =====

    /// Create a topic at the front of the list. Blank titles and unknown
    /// subjects are rejected.
    pub fn create(
        &mut self,
        subject_id: &str,
        title: &str,
        now: DateTime<Utc>,
    ) -> Option<Topic> {
        if title.trim().is_empty() || self.state.subject(subject_id).is_none() {
            return None;
        }
        let topic = Topic::new(subject_id.to_string(), title.to_string(), now);
        self.replace(|s| s.topics.insert(0, topic.clone()));
        Some(topic)
    }

    /// Apply a partial update. A blank title in the patch is ignored.
    pub fn update(&mut self, id: &str, patch: TopicPatch) -> Option<Topic> {
        self.state.topic(id)?;
        self.replace(|s| {
            let topic = s.topics.iter_mut().find(|t| t.id == id)?;
            if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
                topic.title = title;
            }
            if let Some(notes) = patch.notes {
                topic.notes = notes;
            }
            if let Some(is_priority) = patch.is_priority {
                topic.is_priority = is_priority;
            }
            Some(topic.clone())
        })
    }

    /// Flip the priority flag
    pub fn toggle_priority(&mut self, id: &str) -> Option<Topic> {
        let is_priority = self.state.topic(id)?.is_priority;
        self.update(
            id,
            TopicPatch {
                is_priority: Some(!is_priority),
                ..Default::default()
            },
        )
    }

    /// Run the review transition on a topic
    pub fn toggle_completion(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Option<(Topic, ReviewResult)> {
        let result = toggle_review(self.state.topic(id)?, now);
        self.replace(|s| {
            let topic = s.topics.iter_mut().find(|t| t.id == id)?;
            result.apply(topic);
            Some((topic.clone(), result))
        })
    }

    /// Remove a topic. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.state.topic(id).is_none() {
            return false;
        }
        self.replace(|s| s.topics.retain(|t| t.id != id));
        true
    }

    /// Remove every topic belonging to a subject
    pub fn delete_by_subject(&mut self, subject_id: &str) -> usize {
        self.replace(|s| {
            let before = s.topics.len();
            s.topics.retain(|t| t.subject_id != subject_id);
            before - s.topics.len()
        })
    }

    /// Clear the completion flag on completed topics that have come due
    pub fn reset_overdue(&mut self, now: DateTime<Utc>) -> usize {
        let (topics, reset) = reset_overdue(&self.state.topics, now);
        if reset > 0 {
            self.replace(|s| s.topics = topics);
        }
        reset
    }
}
