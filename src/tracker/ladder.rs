//! Fixed interval ladder
//!
//! A topic's step indexes into a fixed sequence of day counts. Step 0 means
//! "due immediately"; steps past the end of the ladder saturate at the last
//! rung instead of inventing longer intervals.

/// Wait times in days, one per rung
pub const INTERVALS: [i64; 7] = [1, 3, 7, 14, 21, 30, 60];

/// Days until the next review for a topic sitting at `step`
pub fn days_for(step: u32) -> i64 {
    if step == 0 {
        return 0;
    }
    let index = (step as usize - 1).min(INTERVALS.len() - 1);
    INTERVALS[index]
}

/// Cycle length shown next to a topic (the rung the topic is working toward)
pub fn cycle_days(step: u32) -> i64 {
    INTERVALS[(step as usize).min(INTERVALS.len() - 1)]
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
