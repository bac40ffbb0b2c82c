//! Review scheduling
//!
//! Leitner-style stepping: marking a topic complete moves it one rung up the
//! ladder, un-marking it moves it one rung down (never below 0). There is no
//! separate "forgot" action; completion is binary and reversible.

use chrono::{DateTime, Duration, Utc};

use super::ladder::days_for;
use super::models::Topic;

/// Result of toggling a topic's completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewResult {
    pub completed: bool,
    pub interval_step: u32,
    pub next_review: DateTime<Utc>,
    /// The topic was genuinely due and has just been marked complete
    pub celebrate: bool,
}

impl ReviewResult {
    /// Write the scheduling fields onto a topic. `celebrate` is advisory only.
    pub fn apply(&self, topic: &mut Topic) {
        topic.completed = self.completed;
        topic.interval_step = self.interval_step;
        topic.next_review = self.next_review;
    }
}

/// Receives the "finished a due review" event. Purely presentational: the
/// transition is identical whether or not anything is listening.
pub trait ReviewObserver {
    fn due_review_completed(&self, topic: &Topic);
}

/// Compute the new completion state, step and due date for a topic
pub fn toggle_review(topic: &Topic, now: DateTime<Utc>) -> ReviewResult {
    let was_completed = topic.completed;

    let interval_step = if was_completed {
        topic.interval_step.saturating_sub(1)
    } else {
        // Uncapped; the ladder clamps the day lookup instead
        topic.interval_step.saturating_add(1)
    };

    let next_review = now + Duration::days(days_for(interval_step));
    let celebrate = !was_completed && topic.is_due(now);

    ReviewResult {
        completed: !was_completed,
        interval_step,
        next_review,
        celebrate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn topic_at(step: u32, completed: bool) -> Topic {
        let mut topic = Topic::new("s1".to_string(), "Limits".to_string(), now());
        topic.interval_step = step;
        topic.completed = completed;
        topic
    }

    #[test]
    fn test_complete_advances_step() {
        for step in 0..10 {
            let result = toggle_review(&topic_at(step, false), now());
            assert!(result.completed);
            assert_eq!(result.interval_step, step + 1);
            assert_eq!(
                result.next_review,
                now() + Duration::days(days_for(step + 1))
            );
        }
    }

    #[test]
    fn test_uncomplete_demotes_step() {
        for step in 0..10 {
            let result = toggle_review(&topic_at(step, true), now());
            assert!(!result.completed);
            assert_eq!(result.interval_step, step.saturating_sub(1));
            assert_eq!(
                result.next_review,
                now() + Duration::days(days_for(result.interval_step))
            );
        }
    }

    #[test]
    fn test_uncomplete_at_zero_stays_floored() {
        let result = toggle_review(&topic_at(0, true), now());
        assert_eq!(result.interval_step, 0);
        assert_eq!(result.next_review, now());
        assert!(!result.celebrate);
    }

    #[test]
    fn test_double_toggle_round_trips() {
        for (step, completed) in [(0, false), (3, false), (3, true), (9, true)] {
            let mut topic = topic_at(step, completed);
            toggle_review(&topic, now()).apply(&mut topic);
            toggle_review(&topic, now()).apply(&mut topic);
            assert_eq!(topic.completed, completed);
            assert_eq!(topic.interval_step, step);
        }

        // Floor case: un-complete at 0 then complete lands on 1, not 0
        let mut topic = topic_at(0, true);
        toggle_review(&topic, now()).apply(&mut topic);
        toggle_review(&topic, now()).apply(&mut topic);
        assert!(topic.completed);
        assert_eq!(topic.interval_step, 1);
    }

    #[test]
    fn test_step_is_not_capped() {
        let result = toggle_review(&topic_at(40, false), now());
        assert_eq!(result.interval_step, 41);
        assert_eq!(result.next_review, now() + Duration::days(60));
    }

    #[test]
    fn test_celebrate_only_when_due_and_completing() {
        let mut due = topic_at(2, false);
        due.next_review = now() - Duration::hours(1);
        assert!(toggle_review(&due, now()).celebrate);

        let mut exactly_due = topic_at(2, false);
        exactly_due.next_review = now();
        assert!(toggle_review(&exactly_due, now()).celebrate);

        let not_due = topic_at(2, false);
        assert!(!toggle_review(&not_due, now()).celebrate);

        let mut uncompleting = topic_at(2, true);
        uncompleting.next_review = now() - Duration::days(3);
        assert!(!toggle_review(&uncompleting, now()).celebrate);
    }
}
