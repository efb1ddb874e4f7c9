use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed study assistant CLI.
/// Data lives under ~/.study or a directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "study", version, about = "Study planner, summaries and quiz CLI")]
pub struct Cli {
    /// Directory holding tasks.json and the summaries folder.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
