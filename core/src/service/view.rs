use crate::model::task::Task;

/// Presentation signals derived from the current task list: the empty-state
/// flag and the completion ratio. Recomputed from scratch after every
/// mutation; holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub total: usize,
    pub completed: usize,
}

impl ViewState {
    pub fn observe(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|t| t.completed).count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Completed fraction in [0, 1]; an empty list reads as 0, not NaN.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn all_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// The "completed / total" counter text shown next to the progress bar.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.completed, self.total)
    }
}
