//! Auto-reset of overdue completed topics
//!
//! Run once per session start. A completed topic whose review date has passed
//! goes back to pending; its step and dates are left as they are.

use chrono::{DateTime, Utc};

use super::models::Topic;

/// Return a new topic list with overdue completions cleared, and how many were reset
pub fn reset_overdue(topics: &[Topic], now: DateTime<Utc>) -> (Vec<Topic>, usize) {
    let mut reset = 0;
    let swept = topics
        .iter()
        .map(|topic| {
            if topic.completed && topic.is_due(now) {
                reset += 1;
                Topic {
                    completed: false,
                    ..topic.clone()
                }
            } else {
                topic.clone()
            }
        })
        .collect();
    (swept, reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
    }

    fn completed_topic(next_review: DateTime<Utc>) -> Topic {
        let mut topic = Topic::new("s1".to_string(), "Derivatives".to_string(), now());
        topic.completed = true;
        topic.interval_step = 3;
        topic.next_review = next_review;
        topic
    }

    #[test]
    fn test_overdue_completion_is_reset() {
        let yesterday = completed_topic(now() - Duration::days(1));
        let (swept, reset) = reset_overdue(&[yesterday.clone()], now());

        assert_eq!(reset, 1);
        assert!(!swept[0].completed);
        assert_eq!(swept[0].interval_step, yesterday.interval_step);
        assert_eq!(swept[0].next_review, yesterday.next_review);
        assert_eq!(swept[0].last_reviewed, yesterday.last_reviewed);
    }

    #[test]
    fn test_future_completion_is_kept() {
        let tomorrow = completed_topic(now() + Duration::days(1));
        let (swept, reset) = reset_overdue(&[tomorrow.clone()], now());

        assert_eq!(reset, 0);
        assert_eq!(swept[0], tomorrow);
    }

    #[test]
    fn test_pending_topics_untouched() {
        let mut pending = completed_topic(now() - Duration::days(2));
        pending.completed = false;
        let (swept, reset) = reset_overdue(&[pending.clone()], now());

        assert_eq!(reset, 0);
        assert_eq!(swept, vec![pending]);
    }
}
