pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::StoreError;
pub use model::task::Task;
pub use repository::{FileSnapshotRepository, SnapshotRepository};
pub use service::task_store::{SyncUpdate, TaskRef, TaskStore};
pub use service::view::ViewState;
