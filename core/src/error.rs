use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// `add` was called with blank or whitespace-only text. Input surfaces
    /// ignore this silently; nothing was mutated or persisted.
    #[error("task text is empty")]
    EmptyInput,

    /// Snapshot read/write failed at the filesystem level.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
