use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::StateBackend;
use crate::tracker::{Subject, Topic};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Subjects and topics as two JSON documents in a data directory
pub struct JsonFileStorage {
    base_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("studyloop"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn subjects_path(&self) -> PathBuf {
        self.base_path.join("subjects.json")
    }

    fn topics_path(&self) -> PathBuf {
        self.base_path.join("topics.json")
    }

    fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        let items: Vec<T> = serde_json::from_str(&content)?;
        Ok(items)
    }

    fn write_list<T: Serialize>(&self, path: &Path, items: &[T]) -> Result<()> {
        self.init()?;
        fs::write(path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl StateBackend for JsonFileStorage {
    fn load_subjects(&self) -> Result<Vec<Subject>> {
        Self::read_list(&self.subjects_path())
    }

    fn load_topics(&self) -> Result<Vec<Topic>> {
        Self::read_list(&self.topics_path())
    }

    fn save_subjects(&self, subjects: &[Subject]) -> Result<()> {
        self.write_list(&self.subjects_path(), subjects)
    }

    fn save_topics(&self, topics: &[Topic]) -> Result<()> {
        self.write_list(&self.topics_path(), topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (JsonFileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("data"));
        (storage, temp_dir)
    }

    #[test]
    fn test_missing_files_load_empty() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.load_subjects().unwrap().is_empty());
        assert!(storage.load_topics().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let (storage, _temp) = create_test_storage();
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        let subject = Subject::new("Math".to_string());
        let mut topic = Topic::new(subject.id.clone(), "Limits".to_string(), now);
        topic.notes = "epsilon-delta".to_string();

        storage.save_subjects(&[subject.clone()]).unwrap();
        storage.save_topics(&[topic.clone()]).unwrap();

        assert_eq!(storage.load_subjects().unwrap(), vec![subject]);
        assert_eq!(storage.load_topics().unwrap(), vec![topic]);
    }

    #[test]
    fn test_writes_camel_case_layout() {
        let (storage, _temp) = create_test_storage();
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let topic = Topic::new("s1".to_string(), "Limits".to_string(), now);
        storage.save_topics(&[topic]).unwrap();

        let raw = fs::read_to_string(storage.base_path().join("topics.json")).unwrap();
        assert!(raw.contains("\"subjectId\""));
        assert!(raw.contains("\"nextReview\": \"2026-03-11T12:00:00Z\""));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (storage, _temp) = create_test_storage();
        storage.init().unwrap();
        fs::write(storage.base_path().join("subjects.json"), "not json").unwrap();

        assert!(matches!(
            storage.load_subjects(),
            Err(StorageError::Json(_))
        ));
    }
}
