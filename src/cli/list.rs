//! `taskflow list` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::storage::{list_profiles, Storage};
use crate::task::{Priority, Task};

const TABLE_COL_STATUS: usize = 2;
const TABLE_COL_TASK: usize = 32;
const TABLE_COL_ASSIGNEE: usize = 12;
const TABLE_COL_DUE: usize = 16;
const TABLE_COL_PRIORITY: usize = 4;
const TABLE_COL_ID_DISPLAY: usize = 12;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Show only tasks that are not done yet
    #[arg(long)]
    pending: bool,

    /// List tasks from all profiles
    #[arg(long)]
    all: bool,
}

#[derive(Serialize)]
struct TaskJson {
    id: String,
    task_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<chrono::DateTime<chrono::Utc>>,
    priority: Priority,
    completed: bool,
    original_input: String,
    profile: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TaskJson {
    fn new(task: &Task, profile: &str) -> Self {
        Self {
            id: task.id.clone(),
            task_name: task.task_name.clone(),
            assignee: task.assignee.clone(),
            due_date: task.due_date,
            priority: task.priority,
            completed: task.completed,
            original_input: task.original_input.clone(),
            profile: profile.to_string(),
            created_at: task.created_at,
        }
    }
}

fn print_table_header() {
    println!(
        "{} {} {} {} {} ID",
        super::pad("ST", TABLE_COL_STATUS),
        super::pad("TASK", TABLE_COL_TASK),
        super::pad("ASSIGNEE", TABLE_COL_ASSIGNEE),
        super::pad("DUE", TABLE_COL_DUE),
        super::pad("PRI", TABLE_COL_PRIORITY),
    );
    println!(
        "{}",
        "-".repeat(
            TABLE_COL_STATUS
                + TABLE_COL_TASK
                + TABLE_COL_ASSIGNEE
                + TABLE_COL_DUE
                + TABLE_COL_PRIORITY
                + TABLE_COL_ID_DISPLAY
                + 5
        )
    );
}

fn print_table_row(task: &Task, date_format: &str) {
    let status = if task.completed { "✓" } else { "○" };
    let name = super::truncate(&task.task_name, TABLE_COL_TASK);
    let assignee = super::truncate(task.assignee.as_deref().unwrap_or("-"), TABLE_COL_ASSIGNEE);
    let due = match &task.due_date {
        Some(due) => due.format(date_format).to_string(),
        None => "-".to_string(),
    };
    let id_display = super::truncate_id(&task.id, TABLE_COL_ID_DISPLAY);
    println!(
        "{} {} {} {} {} {}",
        super::pad(status, TABLE_COL_STATUS),
        super::pad(&name, TABLE_COL_TASK),
        super::pad(&assignee, TABLE_COL_ASSIGNEE),
        super::pad(&super::truncate(&due, TABLE_COL_DUE), TABLE_COL_DUE),
        super::pad(&task.priority.to_string(), TABLE_COL_PRIORITY),
        id_display,
    );
}

pub async fn run(profile: &str, args: ListArgs) -> Result<()> {
    if args.all {
        return run_all_profiles(args.json, args.pending).await;
    }

    let config = Config::load()?;
    let storage = Storage::new(profile)?;
    let mut tasks = storage.load()?;

    if args.pending {
        tasks.retain(|t| !t.completed);
    }

    if tasks.is_empty() {
        println!("No tasks found in profile '{}'.", storage.profile());
        return Ok(());
    }

    if args.json {
        let tasks: Vec<TaskJson> = tasks
            .iter()
            .map(|task| TaskJson::new(task, storage.profile()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    println!("Profile: {}\n", storage.profile());
    print_table_header();
    for task in &tasks {
        print_table_row(task, &config.board.date_format);
    }
    println!("\nTotal: {} tasks", tasks.len());

    Ok(())
}

async fn run_all_profiles(json: bool, pending: bool) -> Result<()> {
    let profiles = list_profiles()?;

    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }

    let config = Config::load()?;

    if json {
        let mut all_tasks: Vec<TaskJson> = Vec::new();
        for profile_name in &profiles {
            if let Ok(storage) = Storage::new(profile_name) {
                if let Ok(tasks) = storage.load() {
                    for task in tasks {
                        if pending && task.completed {
                            continue;
                        }
                        all_tasks.push(TaskJson::new(&task, profile_name));
                    }
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&all_tasks)?);
        return Ok(());
    }

    let mut total_tasks = 0;
    for profile_name in &profiles {
        if let Ok(storage) = Storage::new(profile_name) {
            if let Ok(mut tasks) = storage.load() {
                if pending {
                    tasks.retain(|t| !t.completed);
                }
                if tasks.is_empty() {
                    continue;
                }

                println!("\n═══ Profile: {} ═══\n", profile_name);
                print_table_header();
                for task in &tasks {
                    print_table_row(task, &config.board.date_format);
                }
                println!("({} tasks)", tasks.len());
                total_tasks += tasks.len();
            }
        }
    }

    println!("\n═══════════════════════════════════════");
    println!(
        "Total: {} tasks across {} profiles",
        total_tasks,
        profiles.len()
    );

    Ok(())
}
