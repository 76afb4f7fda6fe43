use serde::{Deserialize, Serialize};

/// A single to-do entry. There is no id field: a task is identified by its
/// position in the list for the lifetime of the in-memory sequence, and the
/// snapshot preserves that order. Stable per-task ids only become necessary
/// if this ever grows multi-client sync.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            text,
            completed: false,
        }
    }
}
