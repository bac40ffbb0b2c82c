//! Derived topic lists and counts
//!
//! Everything here is a pure function of a topic snapshot and the current time.

use chrono::{DateTime, Utc};

use super::ladder::INTERVALS;
use super::models::{FilterMode, LadderStats, RungCount, Topic, TopicQuery};

/// Select, search and order topics for display.
///
/// The base set is the due-and-pending topics in `Today` mode, otherwise the
/// active subject's topics (or everything). A non-blank search keeps topics
/// whose title or notes contain it, case-insensitively. Priority topics come
/// first; relative order is otherwise preserved.
pub fn filter_topics(topics: &[Topic], query: &TopicQuery, now: DateTime<Utc>) -> Vec<Topic> {
    let in_base_set = |topic: &Topic| match (query.mode, query.active_subject.as_deref()) {
        (FilterMode::Today, _) => topic.is_pending(now),
        (FilterMode::All, Some(subject_id)) => topic.subject_id == subject_id,
        (FilterMode::All, None) => true,
    };

    let needle = if query.search.trim().is_empty() {
        None
    } else {
        Some(query.search.to_lowercase())
    };

    let mut result: Vec<Topic> = topics
        .iter()
        .filter(|topic| in_base_set(*topic))
        .filter(|topic| match &needle {
            Some(q) => {
                topic.title.to_lowercase().contains(q.as_str())
                    || topic.notes.to_lowercase().contains(q.as_str())
            }
            None => true,
        })
        .cloned()
        .collect();

    // sort_by_key is stable
    result.sort_by_key(|topic| !topic.is_priority);
    result
}

/// Number of topics due for review and not yet completed
pub fn due_count(topics: &[Topic], now: DateTime<Utc>) -> usize {
    topics.iter().filter(|topic| topic.is_pending(now)).count()
}

/// Count topics at step 0 and at each ladder rung
pub fn ladder_stats(topics: &[Topic]) -> LadderStats {
    let rungs = INTERVALS
        .iter()
        .enumerate()
        .map(|(idx, &days)| {
            let step = idx as u32 + 1;
            RungCount {
                step,
                days,
                count: topics.iter().filter(|t| t.interval_step == step).count(),
            }
        })
        .collect();

    LadderStats {
        total: topics.len(),
        new_topics: topics.iter().filter(|t| t.interval_step == 0).count(),
        rungs,
    }
}
