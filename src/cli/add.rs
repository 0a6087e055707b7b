//! `taskflow add` command implementation

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use crate::storage::Storage;
use crate::task::{parse_sentence, Task};

#[derive(Args)]
pub struct AddArgs {
    /// Task sentence, e.g. "Maria, send the report by Friday P1"
    #[arg(required = true, num_args = 1..)]
    sentence: Vec<String>,

    /// Reference instant for relative dates (RFC 3339, defaults to now)
    #[arg(long)]
    reference: Option<DateTime<Utc>>,
}

pub async fn run(profile: &str, args: AddArgs) -> Result<()> {
    let sentence = args.sentence.join(" ");
    if sentence.trim().is_empty() {
        bail!("Nothing to add: the task sentence is empty");
    }

    let reference = args.reference.unwrap_or_else(Utc::now);
    let parsed = parse_sentence(&sentence, reference);
    let task = Task::from_parsed(parsed);

    let storage = Storage::new(profile)?;
    storage.add(task.clone())?;

    println!("✓ Added task: {}", task.task_name);
    if let Some(assignee) = &task.assignee {
        println!("  Assignee: {}", assignee);
    }
    if let Some(due) = &task.due_date {
        println!("  Due:      {}", due.format("%Y-%m-%d %H:%M"));
    }
    println!("  Priority: {} ({})", task.priority, task.priority.label());
    println!("  ID:       {}", task.id);

    Ok(())
}
