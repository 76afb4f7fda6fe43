use anyhow::Result;
use ratatui::widgets::TableState;
use tickoff_core::{FileSnapshotRepository, StoreError, SyncUpdate, TaskStore, ViewState};

// Celebration banner lifetime in 250ms poll ticks (~3 seconds).
const CELEBRATION_TICKS: u8 = 12;

pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

pub struct App {
    pub store: TaskStore<FileSnapshotRepository>,
    pub view: ViewState,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub celebration_ticks: u8,
}

impl App {
    pub fn new(repo: FileSnapshotRepository) -> Result<App> {
        let (store, update) = TaskStore::open(repo)?;
        let mut state = TableState::default();
        if !store.tasks().is_empty() {
            state.select(Some(0));
        }
        Ok(App {
            view: update.view,
            store,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            celebration_ticks: 0,
        })
    }

    fn apply(&mut self, update: SyncUpdate) {
        self.view = update.view;
        if update.celebrate {
            self.celebration_ticks = CELEBRATION_TICKS;
        }
    }

    pub fn tick(&mut self) {
        if self.celebration_ticks > 0 {
            self.celebration_ticks -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.store.tasks().is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.store.tasks().len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.store.tasks().is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.store.tasks().len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) -> Result<()> {
        if let Some(i) = self.state.selected() {
            if i < self.store.tasks().len() {
                let update = self.store.toggle_complete(i)?;
                self.apply(update);
            }
        }
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        if let Some(i) = self.state.selected() {
            if i < self.store.tasks().len() {
                let update = self.store.delete(i)?;
                self.apply(update);
                self.fix_selection(i);
            }
        }
        Ok(())
    }

    // Keep the selection on a real row after a removal.
    fn fix_selection(&mut self, removed: usize) {
        let len = self.store.tasks().len();
        if len == 0 {
            self.state.select(None);
        } else if removed >= len {
            self.state.select(Some(len - 1));
        } else {
            self.state.select(Some(removed));
        }
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Pull the selected task out of the list and into the input field.
    /// Completed tasks stay put (the store refuses the edit).
    pub fn enter_edit_mode(&mut self) -> Result<()> {
        if let Some(i) = self.state.selected() {
            if i < self.store.tasks().len() {
                if let Some((text, update)) = self.store.edit(i)? {
                    self.apply(update);
                    self.fix_selection(i);
                    self.cursor_position = text.chars().count();
                    self.input = text;
                    self.input_mode = InputMode::Editing;
                }
            }
        }
        Ok(())
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_input(&mut self) -> Result<()> {
        match self.store.add(&self.input) {
            Ok((position, update)) => {
                self.apply(update);
                self.state.select(Some(position));
                self.input.clear();
                self.cursor_position = 0;
                self.input_mode = InputMode::Normal;
            }
            // A blank submit is dropped and the field closes, leaving the
            // list as it was.
            Err(StoreError::EmptyInput) => self.cancel_input(),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }
}
