//! Persistence for subjects and topics
//!
//! The two collections are loaded and saved independently; there is no
//! transaction spanning both writes.

mod file_storage;

pub use file_storage::{JsonFileStorage, Result, StorageError};

use crate::tracker::{Subject, Topic};

/// Where tracker state is read from at startup and written to after changes
pub trait StateBackend {
    fn load_subjects(&self) -> Result<Vec<Subject>>;
    fn load_topics(&self) -> Result<Vec<Topic>>;
    fn save_subjects(&self, subjects: &[Subject]) -> Result<()>;
    fn save_topics(&self, topics: &[Topic]) -> Result<()>;
}
