use crate::error::StoreError;
use crate::model::task::Task;

/// Durable storage for the task snapshot. `save` must write the full
/// sequence in display order; `load` is only called once, at startup.
pub trait SnapshotRepository {
    fn load(&self) -> Result<Vec<Task>, StoreError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}
