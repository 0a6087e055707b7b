//! CLI command implementations

pub mod add;
pub mod clear;
pub mod definition;
pub mod done;
pub mod list;
pub mod parse;
pub mod remove;

pub use definition::{Cli, Commands};

use anyhow::{bail, Result};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::task::Task;

/// Finds a task by exact ID, unique ID prefix, or exact name, in that order.
pub fn resolve_task<'a>(identifier: &str, tasks: &'a [Task]) -> Result<&'a Task> {
    // Try exact ID match
    if let Some(task) = tasks.iter().find(|t| t.id == identifier) {
        return Ok(task);
    }

    // Try ID prefix match, but only when unambiguous
    if !identifier.is_empty() {
        let mut matches = tasks.iter().filter(|t| t.id.starts_with(identifier));
        if let Some(task) = matches.next() {
            if matches.next().is_some() {
                bail!("Task ID prefix is ambiguous: {}", identifier);
            }
            return Ok(task);
        }
    }

    // Try exact name match
    if let Some(task) = tasks.iter().find(|t| t.task_name == identifier) {
        return Ok(task);
    }

    bail!("Task not found: {}", identifier)
}

/// Truncates to at most `max` display columns, appending "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }

    let budget = if max <= 3 { max } else { max - 3 };
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }

    if max > 3 {
        out.push_str("...");
    }
    out
}

pub fn truncate_id(id: &str, max_len: usize) -> &str {
    if id.len() > max_len {
        &id[..max_len]
    } else {
        id
    }
}

/// Pads to `width` display columns with trailing spaces.
pub fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
