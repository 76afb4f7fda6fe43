mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tickoff_core::{FileSnapshotRepository, SnapshotRepository, StoreError, SyncUpdate, TaskStore};

#[derive(Parser)]
#[command(name = "tickoff")]
#[command(about = "A tiny task list with a progress bar and confetti", long_about = None)]
struct Cli {
    /// Directory holding the task snapshot (defaults to ~/.tickoff)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (usage: add Buy milk)
    Add {
        /// Task text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List all tasks with their positions
    List,
    /// Toggle completion of the task at the given position
    Toggle { position: usize },
    /// Take a task out for rewording; prints its text for re-entry
    Edit { position: usize },
    /// Delete the task at the given position
    Delete { position: usize },
    /// Open the terminal user interface
    Tui,
}

// Helper struct for Table Row
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "St")]
    status: &'static str,
    #[tabled(rename = "Task")]
    text: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = FileSnapshotRepository::new(cli.dir)?;

    match cli.command {
        Some(Commands::Add { text }) => {
            let (mut store, _) = TaskStore::open(repo)?;
            match store.add(&text.join(" ")) {
                Ok((position, update)) => {
                    println!("Added #{}: {}", position, store.tasks()[position].text);
                    report(&update);
                }
                // Blank input is dropped silently, same as submitting an
                // empty form field.
                Err(StoreError::EmptyInput) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Some(Commands::List) => {
            let (store, _) = TaskStore::open(repo)?;
            print_list(&store);
        }
        Some(Commands::Toggle { position }) => {
            let (mut store, _) = TaskStore::open(repo)?;
            if in_range(&store, position) {
                let update = store.toggle_complete(position)?;
                let task = &store.tasks()[position];
                let verb = if task.completed { "Completed" } else { "Reopened" };
                println!("{}: {}", verb, task.text);
                report(&update);
            }
        }
        Some(Commands::Edit { position }) => {
            let (mut store, _) = TaskStore::open(repo)?;
            if in_range(&store, position) {
                match store.edit(position)? {
                    Some((text, update)) => {
                        println!("Took out for editing: {}", text);
                        println!("Re-add it with: tickoff add {}", text);
                        report(&update);
                    }
                    None => println!("Completed tasks can't be edited."),
                }
            }
        }
        Some(Commands::Delete { position }) => {
            let (mut store, _) = TaskStore::open(repo)?;
            if in_range(&store, position) {
                let removed = store.tasks()[position].text.clone();
                let update = store.delete(position)?;
                println!("Deleted: {}", removed);
                report(&update);
            }
        }
        Some(Commands::Tui) | None => {
            tui::run(repo)?;
        }
    }
    Ok(())
}

fn print_list<R: SnapshotRepository>(store: &TaskStore<R>) {
    if store.tasks().is_empty() {
        println!("No tasks yet.");
        return;
    }

    let rows: Vec<TaskRow> = store
        .tasks()
        .iter()
        .enumerate()
        .map(|(position, task)| TaskRow {
            position,
            status: if task.completed { "[x]" } else { "[ ]" },
            text: task.text.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    println!("{}", table);
    println!("Progress: {}", store.view().counter());
}

fn in_range<R: SnapshotRepository>(store: &TaskStore<R>, position: usize) -> bool {
    if position >= store.tasks().len() {
        println!("No task at position {}.", position);
        return false;
    }
    true
}

fn report(update: &SyncUpdate) {
    println!("Progress: {}", update.view.counter());
    if update.celebrate {
        celebrate();
    }
}

// Celebration collaborator, terminal edition: fire and forget.
fn celebrate() {
    println!("🎉 ✦ ✧  All tasks completed!  ✧ ✦ 🎉");
}
