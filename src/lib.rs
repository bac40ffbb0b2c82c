pub mod clock;
pub mod config;
pub mod storage;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigError};
pub use storage::{JsonFileStorage, StateBackend, StorageError};
pub use tracker::Tracker;
