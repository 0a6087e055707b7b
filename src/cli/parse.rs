//! `taskflow parse` command implementation

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use crate::storage::Storage;
use crate::task::{parse_transcript, ParsedTask, Task};

#[derive(Args)]
pub struct ParseArgs {
    /// Transcript text (reads stdin when neither text nor --file is given)
    #[arg(num_args = 0.., conflicts_with = "file")]
    text: Vec<String>,

    /// Read the transcript from a file
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Print the extracted tasks without storing them
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Reference instant for relative dates (RFC 3339, defaults to now)
    #[arg(long)]
    reference: Option<DateTime<Utc>>,
}

fn read_input(args: &ParseArgs) -> Result<String> {
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript from {:?}", path));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read transcript from stdin")?;
    Ok(buffer)
}

fn print_parsed(number: usize, parsed: &ParsedTask) {
    println!("{:>2}. {}", number, parsed.task_name);

    let mut fields = Vec::new();
    if let Some(assignee) = &parsed.assignee {
        fields.push(format!("Assignee: {}", assignee));
    }
    if let Some(due) = &parsed.due_date {
        fields.push(format!("Due: {}", due.format("%Y-%m-%d %H:%M")));
    }
    fields.push(format!("Priority: {}", parsed.priority));
    println!("    {}", fields.join("   "));
}

pub async fn run(profile: &str, args: ParseArgs) -> Result<()> {
    let text = read_input(&args)?;
    if text.trim().is_empty() {
        bail!("Nothing to parse: the transcript is empty");
    }

    let reference = args.reference.unwrap_or_else(Utc::now);
    let parsed = parse_transcript(&text, reference);

    if parsed.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("Found {} task(s):\n", parsed.len());
        for (i, task) in parsed.iter().enumerate() {
            print_parsed(i + 1, task);
        }
    }

    if args.dry_run {
        return Ok(());
    }

    let tasks: Vec<Task> = parsed.into_iter().map(Task::from_parsed).collect();
    let count = tasks.len();

    let storage = Storage::new(profile)?;
    storage.add_all(tasks)?;

    if !args.json {
        println!();
    }
    println!("✓ Stored {} task(s) in profile '{}'", count, storage.profile());

    Ok(())
}
