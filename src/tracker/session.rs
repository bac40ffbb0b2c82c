//! A tracker session: the store plus its collaborators
//!
//! `Tracker` reads the clock for every time-dependent call, saves after each
//! change, and forwards on-time completions to an optional observer. Save
//! failures are logged and swallowed; the in-memory state stays authoritative.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::models::{LadderStats, Subject, Topic, TopicPatch, TopicQuery};
use super::scheduler::ReviewObserver;
use super::store::{Snapshot, TopicStore};
use super::view;
use crate::clock::Clock;
use crate::storage::{self, StateBackend};

pub struct Tracker {
    store: TopicStore,
    backend: Box<dyn StateBackend>,
    clock: Box<dyn Clock>,
    observer: Option<Box<dyn ReviewObserver>>,
}

impl Tracker {
    /// Load saved state and run the start-of-session auto-reset.
    ///
    /// Fails only if saved state exists but cannot be read, so a corrupt file
    /// is never silently replaced with an empty collection.
    pub fn open(backend: Box<dyn StateBackend>, clock: Box<dyn Clock>) -> storage::Result<Self> {
        let subjects = backend.load_subjects()?;
        let topics = backend.load_topics()?;
        log::info!("Loaded {} subjects and {} topics", subjects.len(), topics.len());

        let mut tracker = Self {
            store: TopicStore::new(subjects, topics),
            backend,
            clock,
            observer: None,
        };

        let reset = tracker.store.reset_overdue(tracker.clock.now());
        if reset > 0 {
            log::info!("Reset {} overdue completed topics to pending", reset);
            tracker.save_topics();
        }

        Ok(tracker)
    }

    pub fn with_observer(mut self, observer: Box<dyn ReviewObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current time according to the session clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    pub fn subjects(&self) -> &[Subject] {
        self.store.subjects()
    }

    pub fn topics(&self) -> &[Topic] {
        self.store.topics()
    }

    // ===== Subjects =====

    pub fn add_subject(&mut self, name: &str) -> Option<Subject> {
        let subject = self.store.add_subject(name)?;
        self.save_subjects();
        Some(subject)
    }

    /// Delete a subject and its topics. Returns how many topics went with it.
    pub fn delete_subject(&mut self, id: &str) -> Option<usize> {
        let removed = self.store.delete_subject(id)?;
        self.save_subjects();
        self.save_topics();
        Some(removed)
    }

    // ===== Topics =====

    pub fn add_topic(&mut self, subject_id: &str, title: &str) -> Option<Topic> {
        let topic = self.store.create(subject_id, title, self.clock.now())?;
        self.save_topics();
        Some(topic)
    }

    pub fn update_topic(&mut self, id: &str, patch: TopicPatch) -> Option<Topic> {
        let topic = self.store.update(id, patch)?;
        self.save_topics();
        Some(topic)
    }

    pub fn set_notes(&mut self, id: &str, notes: String) -> Option<Topic> {
        self.update_topic(
            id,
            TopicPatch {
                notes: Some(notes),
                ..Default::default()
            },
        )
    }

    pub fn toggle_priority(&mut self, id: &str) -> Option<Topic> {
        let topic = self.store.toggle_priority(id)?;
        self.save_topics();
        Some(topic)
    }

    /// Mark a topic complete, or undo that, rescheduling it either way
    pub fn toggle_completion(&mut self, id: &str) -> Option<Topic> {
        let (topic, result) = self.store.toggle_completion(id, self.clock.now())?;
        log::debug!(
            "Topic {} -> completed={} step={} next={}",
            topic.id,
            topic.completed,
            topic.interval_step,
            topic.next_review
        );

        if result.celebrate {
            if let Some(observer) = &self.observer {
                observer.due_review_completed(&topic);
            }
        }

        self.save_topics();
        Some(topic)
    }

    pub fn delete_topic(&mut self, id: &str) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            self.save_topics();
        }
        deleted
    }

    // ===== Derived views =====

    pub fn view(&self, query: &TopicQuery) -> Vec<Topic> {
        view::filter_topics(self.store.topics(), query, self.clock.now())
    }

    pub fn due_count(&self) -> usize {
        view::due_count(self.store.topics(), self.clock.now())
    }

    pub fn stats(&self) -> LadderStats {
        view::ladder_stats(self.store.topics())
    }

    // ===== Persistence =====

    fn save_subjects(&self) {
        if let Err(e) = self.backend.save_subjects(self.store.subjects()) {
            log::warn!("Failed to save subjects: {}", e);
        }
    }

    fn save_topics(&self) {
        if let Err(e) = self.backend.save_topics(self.store.topics()) {
            log::warn!("Failed to save topics: {}", e);
        }
    }
}
