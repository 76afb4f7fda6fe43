use crate::error::StoreError;
use crate::model::task::Task;
use crate::repository::SnapshotRepository;
use crate::service::view::ViewState;

/// Position of a task in the list, taken from the current render. Positions
/// are invalidated by the next mutation; an out-of-range position is a
/// caller bug and panics rather than being modeled as a runtime error.
pub type TaskRef = usize;

/// What a mutation hands back to the presentation layer: the recomputed
/// view signals and whether the celebration effect should fire now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncUpdate {
    pub view: ViewState,
    pub celebrate: bool,
}

/// The ordered task list plus its write-through persistence. Every mutation
/// persists the full snapshot before reporting back; the file on disk is
/// never ahead of or behind the in-memory sequence.
pub struct TaskStore<R: SnapshotRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: SnapshotRepository> TaskStore<R> {
    /// Open the store over its repository, loading the saved snapshot.
    pub fn open(repo: R) -> Result<(Self, SyncUpdate), StoreError> {
        let snapshot = repo.load()?;
        let mut store = Self {
            repo,
            tasks: Vec::new(),
        };
        let update = store.load(snapshot);
        Ok((store, update))
    }

    /// Replace the contents wholesale. Does not persist (the snapshot *is*
    /// the persisted state) and never celebrates, even when every restored
    /// task is already complete.
    pub fn load(&mut self, snapshot: Vec<Task>) -> SyncUpdate {
        self.tasks = snapshot;
        self.sync(false)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view(&self) -> ViewState {
        ViewState::observe(&self.tasks)
    }

    /// Append a task at the end. Whitespace-only text is rejected with
    /// `EmptyInput` before anything is mutated or persisted.
    pub fn add(&mut self, text: &str) -> Result<(TaskRef, SyncUpdate), StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyInput);
        }
        self.tasks.push(Task::new(trimmed.to_string()));
        self.persist()?;
        Ok((self.tasks.len() - 1, self.sync(true)))
    }

    /// Flip the completion flag of the referenced task.
    pub fn toggle_complete(&mut self, task: TaskRef) -> Result<SyncUpdate, StoreError> {
        self.tasks[task].completed = !self.tasks[task].completed;
        self.persist()?;
        Ok(self.sync(true))
    }

    /// Take a task out for editing, returning its text so the caller can
    /// pre-populate the input field. Completed tasks are not editable; the
    /// call is a no-op returning `None`. Removing a task for an edit never
    /// fires the celebration, regardless of what remains.
    pub fn edit(&mut self, task: TaskRef) -> Result<Option<(String, SyncUpdate)>, StoreError> {
        if self.tasks[task].completed {
            return Ok(None);
        }
        let removed = self.tasks.remove(task);
        self.persist()?;
        Ok(Some((removed.text, self.sync(false))))
    }

    /// Remove the referenced task unconditionally. Deleting an incomplete
    /// task can bring the remainder to 100%, so the celebration check
    /// stays on.
    pub fn delete(&mut self, task: TaskRef) -> Result<SyncUpdate, StoreError> {
        self.tasks.remove(task);
        self.persist()?;
        Ok(self.sync(true))
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.repo.save(&self.tasks)
    }

    fn sync(&self, check_completion: bool) -> SyncUpdate {
        let view = ViewState::observe(&self.tasks);
        SyncUpdate {
            view,
            celebrate: check_completion && view.all_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every snapshot handed to `save`, so tests can assert the
    /// persisted sequence tracks the in-memory one mutation by mutation.
    /// Clones share the recording, letting the test keep a handle while the
    /// store owns its copy.
    #[derive(Clone, Default)]
    struct RecordingRepo {
        saves: Rc<RefCell<Vec<Vec<Task>>>>,
    }

    impl RecordingRepo {
        fn new() -> Self {
            Self::default()
        }

        fn last_save(&self) -> Option<Vec<Task>> {
            self.saves.borrow().last().cloned()
        }

        fn save_count(&self) -> usize {
            self.saves.borrow().len()
        }
    }

    impl SnapshotRepository for RecordingRepo {
        fn load(&self) -> Result<Vec<Task>, StoreError> {
            Ok(Vec::new())
        }

        fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
            self.saves.borrow_mut().push(tasks.to_vec());
            Ok(())
        }
    }

    fn task(text: &str, completed: bool) -> Task {
        Task {
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn add_trims_and_appends_incomplete() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();

        let (task_ref, update) = store.add("  buy milk  ").unwrap();
        assert_eq!(task_ref, 0);
        assert_eq!(store.tasks(), &[task("buy milk", false)]);
        assert_eq!(update.view.ratio(), 0.0);
        assert!(!update.celebrate);
    }

    #[test]
    fn blank_add_is_rejected_without_persisting() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("keep me").unwrap();
        let saves_before = repo.save_count();

        assert!(matches!(store.add(""), Err(StoreError::EmptyInput)));
        assert!(matches!(store.add("   "), Err(StoreError::EmptyInput)));
        assert_eq!(store.tasks(), &[task("keep me", false)]);
        assert_eq!(repo.save_count(), saves_before);
    }

    #[test]
    fn every_mutation_persists_the_current_sequence() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();

        store.add("buy milk").unwrap();
        assert_eq!(repo.last_save().unwrap(), store.tasks());

        store.add("walk dog").unwrap();
        assert_eq!(repo.last_save().unwrap(), store.tasks());

        store.toggle_complete(0).unwrap();
        assert_eq!(repo.last_save().unwrap(), store.tasks());

        store.delete(0).unwrap();
        assert_eq!(repo.last_save().unwrap(), store.tasks());

        // "walk dog" is still open, so the edit removes and persists.
        store.edit(0).unwrap();
        assert_eq!(repo.last_save().unwrap(), store.tasks());

        // Round trip: loading the last snapshot reproduces the sequence.
        let snapshot = repo.last_save().unwrap();
        let current = store.tasks().to_vec();
        store.load(snapshot);
        assert_eq!(store.tasks(), current);
    }

    #[test]
    fn toggle_flips_both_ways() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("buy milk").unwrap();

        let update = store.toggle_complete(0).unwrap();
        assert!(store.tasks()[0].completed);
        assert!(update.celebrate);

        let update = store.toggle_complete(0).unwrap();
        assert!(!store.tasks()[0].completed);
        assert_eq!(update.view.ratio(), 0.0);
        assert!(!update.celebrate);
    }

    #[test]
    fn edit_of_completed_task_is_a_no_op() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("buy milk").unwrap();
        store.toggle_complete(0).unwrap();
        let saves_before = repo.save_count();

        assert_eq!(store.edit(0).unwrap(), None);
        assert_eq!(store.tasks(), &[task("buy milk", true)]);
        assert_eq!(repo.save_count(), saves_before);
    }

    #[test]
    fn edit_removes_the_task_and_returns_its_text() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("buy milk").unwrap();
        store.add("walk dog").unwrap();

        let (text, update) = store.edit(0).unwrap().unwrap();
        assert_eq!(text, "buy milk");
        assert_eq!(store.tasks(), &[task("walk dog", false)]);
        assert_eq!(update.view.total, 1);
    }

    #[test]
    fn edit_never_celebrates_even_when_the_rest_is_complete() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("done already").unwrap();
        store.add("in progress").unwrap();
        store.toggle_complete(0).unwrap();

        // Pulling the open task leaves only completed ones behind.
        let (_, update) = store.edit(1).unwrap().unwrap();
        assert!(update.view.all_complete());
        assert!(!update.celebrate);
    }

    #[test]
    fn delete_can_complete_the_remainder_and_celebrates() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("done").unwrap();
        store.add("never happening").unwrap();
        store.toggle_complete(0).unwrap();

        let update = store.delete(1).unwrap();
        assert_eq!(update.view.ratio(), 1.0);
        assert!(update.celebrate);
    }

    #[test]
    fn delete_to_empty_does_not_celebrate() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();
        store.add("only one").unwrap();

        let update = store.delete(0).unwrap();
        assert!(update.view.is_empty());
        assert!(!update.celebrate);
    }

    #[test]
    fn load_replaces_without_persisting_or_celebrating() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();

        let update = store.load(vec![task("restored", true), task("also done", true)]);
        assert_eq!(update.view.ratio(), 1.0);
        assert!(!update.celebrate);
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn completion_scenario_end_to_end() {
        let repo = RecordingRepo::new();
        let (mut store, _) = TaskStore::open(repo.clone()).unwrap();

        let (_, update) = store.add("buy milk").unwrap();
        assert_eq!(store.tasks(), &[task("buy milk", false)]);
        assert_eq!(update.view.ratio(), 0.0);

        let update = store.toggle_complete(0).unwrap();
        assert_eq!(update.view.ratio(), 1.0);
        assert!(update.celebrate);

        let (_, update) = store.add("walk dog").unwrap();
        assert_eq!(
            store.tasks(),
            &[task("buy milk", true), task("walk dog", false)]
        );
        assert_eq!(update.view.ratio(), 0.5);
        assert!(!update.celebrate);

        let update = store.delete(0).unwrap();
        assert_eq!(store.tasks(), &[task("walk dog", false)]);
        assert_eq!(update.view.ratio(), 0.0);
        assert!(!update.celebrate);

        let update = store.toggle_complete(0).unwrap();
        assert_eq!(update.view.ratio(), 1.0);
        assert!(update.celebrate);
    }
}
