//! CLI argument definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use super::add::AddArgs;
use super::done::DoneArgs;
use super::list::ListArgs;
use super::parse::ParseArgs;
use super::remove::RemoveArgs;

#[derive(Parser)]
#[command(
    name = "taskflow",
    version,
    about = "Turn natural language into a task list",
    long_about = "Taskflow extracts structured tasks (assignee, due date, priority) from \
plain sentences or whole meeting transcripts. Run without a subcommand to open the board."
)]
pub struct Cli {
    /// Profile to use (each profile keeps its own task list)
    #[arg(short = 'p', long, global = true, env = "TASKFLOW_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task from a natural language sentence
    Add(AddArgs),

    /// Extract tasks from meeting notes or a transcript
    Parse(ParseArgs),

    /// List tasks
    List(ListArgs),

    /// Mark a task as done (or reopen it)
    Done(DoneArgs),

    /// Remove a task
    Remove(RemoveArgs),

    /// Remove all completed tasks
    Clear,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
