use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use serde_json::Value;

use crate::error::StoreError;
use crate::model::task::Task;
use crate::repository::traits::SnapshotRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";

#[derive(Clone)]
pub struct FileSnapshotRepository {
    file_path: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir().ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "could not determine home directory",
                    )
                })?;
                home_dir.join(".tickoff")
            }
        };
        fs::create_dir_all(&path)?; // Ensure the directory exists
        path.push(DEFAULT_FILE_NAME);

        Ok(FileSnapshotRepository { file_path: path })
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        // A snapshot that was never written means an empty list, not an error.
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let value: Value = serde_json::from_reader(reader)?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            // Anything else in the file is not a snapshot; start empty.
            _ => Ok(Vec::new()),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(repo.load().unwrap(), Vec::new());
    }

    #[test]
    fn non_array_json_loads_as_empty() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.path(), "{\"not\": \"a snapshot\"}").unwrap();
        assert_eq!(repo.load().unwrap(), Vec::new());

        fs::write(repo.path(), "null").unwrap();
        assert_eq!(repo.load().unwrap(), Vec::new());
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(Some(dir.path().to_path_buf())).unwrap();

        let tasks = vec![
            Task {
                text: "buy milk".to_string(),
                completed: true,
            },
            Task::new("walk dog".to_string()),
        ];
        repo.save(&tasks).unwrap();
        assert_eq!(repo.load().unwrap(), tasks);
    }

    #[test]
    fn snapshot_is_a_json_array_of_text_completed_pairs() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(Some(dir.path().to_path_buf())).unwrap();

        repo.save(&[Task::new("buy milk".to_string())]).unwrap();
        let raw = fs::read_to_string(repo.path()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"text": "buy milk", "completed": false}])
        );
    }

    #[test]
    fn malformed_json_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.path(), "{ not json").unwrap();
        assert!(matches!(repo.load(), Err(StoreError::Json(_))));
    }
}
