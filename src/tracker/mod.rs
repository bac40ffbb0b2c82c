//! Spaced-repetition study tracking
//!
//! This module provides:
//! - Subject and topic models
//! - The fixed interval ladder and the review transition over it
//! - A copy-on-write store for subjects and topics
//! - Due/filter views and ladder statistics
//! - The start-of-session auto-reset sweep
//! - `Tracker`, which wires the store to a clock, a persistence backend and
//!   an optional review observer

pub mod ladder;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod sweep;
pub mod view;

pub use models::*;
pub use scheduler::{toggle_review, ReviewObserver, ReviewResult};
pub use session::Tracker;
pub use store::{Snapshot, TopicStore};
