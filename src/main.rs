//! # Study - Study Assistant CLI
//!
//! A command-line study assistant with document summaries, auto-generated
//! quizzes and a terminal task planner.
//!
//! ## Key Features
//!
//! - **Task Planner**: due-dated study tasks persisted to a local JSON file,
//!   with completion tracking and an overall progress metric
//! - **Auto Quiz**: heuristic multiple-choice questions generated straight
//!   from a `.txt` or `.pdf` document, printable or playable in the terminal
//! - **Summaries**: truncated, reformatted copies of document text saved as
//!   named plain-text files
//! - **Multiple Interfaces**: full CLI for scripted use + interactive TUI for
//!   planning and quizzing
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive planner
//! study ui
//!
//! # Add a task via CLI
//! study add "Read chapter 3" --due "2024-01-01 10:00:00"
//!
//! # List tasks (sorted by due date)
//! study list
//!
//! # Quiz yourself on a document
//! study quiz lecture.pdf --interactive
//!
//! # Save a bullet-point summary
//! study summarise notes.txt --name biology --style bullets
//! ```
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! Data is stored locally in `~/.study/`: `tasks.json` holds the task list
//! and `summaries/` holds one text file per saved summary. Pass `--data-dir`
//! to keep everything somewhere else.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod extract;
pub mod quiz;
pub mod quotes;
pub mod store;
pub mod summary;
pub mod task;
pub mod tui {
    pub mod colors;
    pub mod input;
    pub mod planner;
    pub mod quiz_app;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use store::TaskStore;

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    // Determine the study directory
    let study_dir = cli.data_dir.clone().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".study")
    });
    let summaries_dir = study_dir.join("summaries");
    if let Err(e) = std::fs::create_dir_all(&summaries_dir) {
        eprintln!("Failed to create study directory {}: {}", study_dir.display(), e);
        std::process::exit(1);
    }
    let tasks_path = study_dir.join("tasks.json");

    let mut store = TaskStore::load_or_default(&tasks_path);

    match cli.command {
        Commands::Ui => cmd_ui(&tasks_path),

        Commands::Add { title, due } => cmd_add(&mut store, &tasks_path, title, due),

        Commands::List { all, limit } => cmd_list(&store, all, limit),

        Commands::Done { id } => cmd_done(&mut store, &tasks_path, id),

        Commands::Delete { id } => cmd_delete(&mut store, &tasks_path, id),

        Commands::Quiz { file, questions, interactive } =>
            cmd_quiz(file, questions, interactive),

        Commands::Summarise { file, name, style } =>
            cmd_summarise(&summaries_dir, file, name, style),

        Commands::Summaries => cmd_summaries(&summaries_dir),

        Commands::Show { name } => cmd_show(&summaries_dir, name),

        Commands::Quote => cmd_quote(),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}
