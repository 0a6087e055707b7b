//! `taskflow done` command implementation

use anyhow::Result;
use clap::Args;

use crate::storage::Storage;

#[derive(Args)]
pub struct DoneArgs {
    /// Task ID, ID prefix, or exact task name
    identifier: String,
}

pub async fn run(profile: &str, args: DoneArgs) -> Result<()> {
    let storage = Storage::new(profile)?;
    let tasks = storage.load()?;
    let id = super::resolve_task(&args.identifier, &tasks)?.id.clone();

    let task = storage.toggle(&id)?;
    if task.completed {
        println!("✓ Completed: {}", task.task_name);
    } else {
        println!("○ Reopened: {}", task.task_name);
    }

    Ok(())
}
