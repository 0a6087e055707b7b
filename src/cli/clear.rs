//! `taskflow clear` command implementation

use anyhow::Result;

use crate::storage::Storage;

pub async fn run(profile: &str) -> Result<()> {
    let storage = Storage::new(profile)?;
    let removed = storage.clear_completed()?;

    if removed == 0 {
        println!("No completed tasks to remove.");
    } else {
        println!("✓ Removed {} completed task(s)", removed);
    }

    Ok(())
}
