use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Desktop tracker for coding-problem practice.
#[derive(Debug, Parser)]
#[command(name = "practice", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// SQLite database (`sqlite://path`, a bare path, or `sqlite::memory:`).
    #[arg(long, global = true, value_name = "SQLITE_URL")]
    pub db: Option<String>,

    /// Judging webhook that submissions are forwarded to.
    #[arg(long, global = true, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// TOML config file (defaults to `practice.toml` when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the desktop window (default).
    Ui,
    /// Store a sample session that is due for review today.
    Seed,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Ui)
    }
}
