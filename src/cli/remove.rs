//! `taskflow remove` command implementation

use anyhow::Result;
use clap::Args;

use crate::storage::Storage;

#[derive(Args)]
pub struct RemoveArgs {
    /// Task ID, ID prefix, or exact task name
    identifier: String,
}

pub async fn run(profile: &str, args: RemoveArgs) -> Result<()> {
    let storage = Storage::new(profile)?;
    let tasks = storage.load()?;
    let id = super::resolve_task(&args.identifier, &tasks)?.id.clone();

    let task = storage.remove(&id)?;
    println!("✓ Removed task: {}", task.task_name);

    Ok(())
}
