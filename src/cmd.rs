//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers that implement the various
//! subcommands available in the CLI, from task CRUD operations to quiz
//! generation, summary management and the TUI interfaces.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::path::{Path, PathBuf};

use rand::thread_rng;

use crate::extract::read_document;
use crate::quiz::generate_questions;
use crate::quotes::random_quote;
use crate::store::{parse_due_input, print_table, TaskStore};
use crate::summary::{format_summary, list_summaries, load_summary, save_summary, SummaryStyle};
use crate::task::due_format;
use crate::tui::run::{run_planner_tui, run_quiz_tui};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive study planner interface.
    Ui,

    /// Add a study task.
    Add {
        /// Short title for the task.
        title: String,
        /// Due date: "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DD", "today", "tomorrow", or "in Nd".
        #[arg(long)]
        due: String,
    },

    /// List tasks ordered by due date.
    List {
        /// Include completed tasks.
        #[arg(long)]
        all: bool,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Mark a task as done.
    Done {
        /// Task ID.
        id: u64,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// Generate a multiple-choice quiz from a .txt or .pdf document.
    Quiz {
        /// Document to generate questions from.
        file: PathBuf,
        /// Maximum number of questions.
        #[arg(long, default_value_t = 5)]
        questions: usize,
        /// Run the quiz interactively in the terminal.
        #[arg(long)]
        interactive: bool,
    },

    /// Save a truncated, reformatted summary of a document.
    Summarise {
        /// Document to summarise.
        file: PathBuf,
        /// Name for the saved summary.
        #[arg(long, default_value = "summary1")]
        name: String,
        /// Reformatting style: normal | simplified | bullets.
        #[arg(long, value_enum, default_value_t = SummaryStyle::Normal)]
        style: SummaryStyle,
    },

    /// List saved summaries.
    Summaries,

    /// Print a saved summary.
    Show {
        /// Summary name.
        name: String,
    },

    /// Print a motivational study quote.
    Quote,

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the study planner terminal user interface.
pub fn cmd_ui(tasks_path: &Path) {
    if let Err(e) = run_planner_tui(tasks_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(store: &mut TaskStore, tasks_path: &Path, title: String, due: String) {
    let Some(due) = parse_due_input(&due) else {
        eprintln!("Could not parse due date '{due}'. Use YYYY-MM-DD [HH:MM:SS], today, tomorrow or in Nd.");
        std::process::exit(1);
    };

    let id = match store.add(&title, due) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = store.save(tasks_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Added task {} (due {})", id, due.format(due_format::FORMAT));
}

/// List tasks sorted by due date, with the completion progress underneath.
pub fn cmd_list(store: &TaskStore, all: bool, limit: Option<usize>) {
    if store.tasks.is_empty() {
        println!("No tasks yet.");
        return;
    }

    let mut view: Vec<_> = store
        .sorted_by_due()
        .into_iter()
        .filter(|t| all || !t.done)
        .collect();
    if let Some(n) = limit {
        view.truncate(n);
    }
    print_table(&view);

    let done = store.tasks.iter().filter(|t| t.done).count();
    println!(
        "\nProgress: {}% ({} of {} done)",
        store.progress_percent(),
        done,
        store.tasks.len()
    );
}

/// Mark a task as done.
pub fn cmd_done(store: &mut TaskStore, tasks_path: &Path, id: u64) {
    if let Err(e) = store.mark_done(id) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    if let Err(e) = store.save(tasks_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Marked task {id} done.");
}

/// Delete a task.
pub fn cmd_delete(store: &mut TaskStore, tasks_path: &Path, id: u64) {
    let removed = match store.delete(id) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = store.save(tasks_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
    println!("Deleted task {} ({})", removed.id, removed.title);
}

/// Generate a quiz from a document and print or run it.
pub fn cmd_quiz(file: PathBuf, questions: usize, interactive: bool) {
    let text = match read_document(&file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", file.display());
            std::process::exit(1);
        }
    };

    let quiz = generate_questions(&text, questions);
    if quiz.is_empty() {
        // Not an error: the document simply has too little usable text.
        println!("Not enough valid sentences for a quiz.");
        return;
    }

    if interactive {
        if let Err(e) = run_quiz_tui(quiz) {
            eprintln!("UI error: {e}");
            std::process::exit(1);
        }
        return;
    }

    for (i, q) in quiz.iter().enumerate() {
        println!("Q{}: {}", i + 1, q.prompt);
        for (j, option) in q.options.iter().enumerate() {
            println!("   {}) {}", j + 1, option);
        }
        println!();
    }
    println!("Answer key:");
    for (i, q) in quiz.iter().enumerate() {
        println!("   Q{}: {}", i + 1, q.answer);
    }
}

/// Save a summary of a document.
pub fn cmd_summarise(summaries_dir: &Path, file: PathBuf, name: String, style: SummaryStyle) {
    let text = match read_document(&file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", file.display());
            std::process::exit(1);
        }
    };

    let content = format_summary(&text, style);
    match save_summary(summaries_dir, &name, &content) {
        Ok(summary) => println!(
            "Saved summary '{}' to {}",
            summary.name,
            summary.file_path.display()
        ),
        Err(e) => {
            eprintln!("Failed to save summary: {e}");
            std::process::exit(1);
        }
    }
}

/// List saved summaries.
pub fn cmd_summaries(summaries_dir: &Path) {
    let summaries = match list_summaries(summaries_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to list summaries: {e}");
            std::process::exit(1);
        }
    };
    if summaries.is_empty() {
        println!("No summaries saved yet.");
        return;
    }
    for summary in summaries {
        println!("{}", summary.name);
    }
}

/// Print a saved summary.
pub fn cmd_show(summaries_dir: &Path, name: String) {
    match load_summary(summaries_dir, &name) {
        Ok(content) => println!("{content}"),
        Err(_) => {
            eprintln!("Summary '{name}' not found.");
            std::process::exit(1);
        }
    }
}

/// Print a random motivational quote.
pub fn cmd_quote() {
    println!("{}", random_quote(&mut thread_rng()));
}

/// Generate shell completions for the given shell.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
