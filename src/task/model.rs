//! Task data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Task priority, P1 (urgent) through P4 (low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    #[default]
    P3,
    P4,
}

impl Priority {
    /// Parse priority from text (case-insensitive "p1".."p4")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "p1" => Some(Self::P1),
            "p2" => Some(Self::P2),
            "p3" => Some(Self::P3),
            "p4" => Some(Self::P4),
            _ => None,
        }
    }

    /// Get the label shown next to the code in list output
    pub fn label(&self) -> &'static str {
        match self {
            Self::P1 => "urgent",
            Self::P2 => "high",
            Self::P3 => "normal",
            Self::P4 => "low",
        }
    }

    /// All priorities in display order
    pub fn all() -> [Self; 4] {
        [Self::P1, Self::P2, Self::P3, Self::P4]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        };
        write!(f, "{}", code)
    }
}

/// Structured record extracted from one sentence.
///
/// Immutable once produced: `task_name` is always non-empty (falling back to
/// the original sentence when stripping leaves nothing), `priority` is always
/// set, and the optional fields stay absent when the sentence doesn't mention
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTask {
    /// Sentence with assignee/priority/date fragments removed
    pub task_name: String,

    /// Leading "<word>," token, case preserved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Absolute due instant, if a date expression was recognized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Extracted priority token, P3 when unspecified
    #[serde(default)]
    pub priority: Priority,
}

/// A stored task: a [`ParsedTask`] plus identity and lifecycle fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique opaque ID
    pub id: String,

    /// Task title
    pub task_name: String,

    /// Who the task is assigned to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// When the task is due. Persisted values that fail to parse are
    /// discarded on load rather than failing the whole list.
    #[serde(
        default,
        deserialize_with = "lenient_due_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Whether the task has been completed
    #[serde(default)]
    pub completed: bool,

    /// Reconstructed one-line summary of the parsed fields
    pub original_input: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Assemble a stored task from a parse result
    pub fn from_parsed(parsed: ParsedTask) -> Self {
        Self::from_parsed_at(parsed, Utc::now())
    }

    /// Assemble with an explicit creation time (deterministic variant)
    pub fn from_parsed_at(parsed: ParsedTask, created_at: DateTime<Utc>) -> Self {
        let original_input = reconstruct_input(&parsed);
        Self {
            id: generate_id(),
            task_name: parsed.task_name,
            assignee: parsed.assignee,
            due_date: parsed.due_date,
            priority: parsed.priority,
            completed: false,
            original_input,
            created_at,
        }
    }

    /// Toggle the completion flag
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Check if the task is overdue at the given instant
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match &self.due_date {
            Some(due) => !self.completed && due < &now,
            None => false,
        }
    }
}

/// Rebuild the display summary: name, "by <assignee>", date, priority,
/// space-joined with empty parts skipped.
fn reconstruct_input(parsed: &ParsedTask) -> String {
    let mut parts: Vec<String> = vec![parsed.task_name.clone()];
    if let Some(assignee) = &parsed.assignee {
        parts.push(format!("by {}", assignee));
    }
    if let Some(due) = &parsed.due_date {
        parts.push(due.format("%Y-%m-%d").to_string());
    }
    parts.push(parsed.priority.to_string());
    parts.join(" ").trim().to_string()
}

fn generate_id() -> String {
    Uuid::new_v4().to_string().replace("-", "")[..16].to_string()
}

/// Deserialize a due date, treating malformed values as absent. Persisted
/// lists survive hand edits and older formats this way; the warning is the
/// only trace the value leaves.
fn lenient_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(_) => {
                tracing::warn!("Discarding unparseable due date: {:?}", s);
                None
            }
        },
        serde_json::Value::Null => None,
        other => {
            tracing::warn!("Discarding non-string due date: {}", other);
            None
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parsed(name: &str) -> ParsedTask {
        ParsedTask {
            task_name: name.to_string(),
            assignee: None,
            due_date: None,
            priority: Priority::default(),
        }
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("P1"), Some(Priority::P1));
        assert_eq!(Priority::parse("p4"), Some(Priority::P4));
        assert_eq!(Priority::parse(" p2 "), Some(Priority::P2));
        assert_eq!(Priority::parse("P5"), None);
        assert_eq!(Priority::parse("high"), None);
    }

    #[test]
    fn test_priority_default_and_order() {
        assert_eq!(Priority::default(), Priority::P3);
        assert!(Priority::P1 < Priority::P2);
        assert!(Priority::P3 < Priority::P4);
        assert_eq!(Priority::P2.to_string(), "P2");
        assert_eq!(Priority::P1.label(), "urgent");
    }

    #[test]
    fn test_from_parsed_defaults() {
        let task = Task::from_parsed(parsed("Review budget"));
        assert_eq!(task.task_name, "Review budget");
        assert!(!task.completed);
        assert_eq!(task.id.len(), 16);
        assert!(task.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::from_parsed(parsed("a"));
        let b = Task::from_parsed(parsed("b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_reconstruct_input_full() {
        let due = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let task = Task::from_parsed(ParsedTask {
            task_name: "finish the report".to_string(),
            assignee: Some("Maria".to_string()),
            due_date: Some(due),
            priority: Priority::P1,
        });
        assert_eq!(task.original_input, "finish the report by Maria 2025-06-20 P1");
    }

    #[test]
    fn test_reconstruct_input_minimal() {
        let task = Task::from_parsed(parsed("Review budget"));
        assert_eq!(task.original_input, "Review budget P3");
    }

    #[test]
    fn test_toggle_completed() {
        let mut task = Task::from_parsed(parsed("x"));
        task.toggle_completed();
        assert!(task.completed);
        task.toggle_completed();
        assert!(!task.completed);
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc.with_ymd_and_hms(2025, 6, 13, 12, 0, 0).unwrap();
        let mut task = Task::from_parsed(parsed("x"));
        assert!(!task.is_overdue(now));

        task.due_date = Some(Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap());
        assert!(task.is_overdue(now));

        task.completed = true;
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_task_json_roundtrip() {
        let due = Utc.with_ymd_and_hms(2025, 6, 20, 15, 0, 0).unwrap();
        let task = Task::from_parsed(ParsedTask {
            task_name: "call client".to_string(),
            assignee: Some("John".to_string()),
            due_date: Some(due),
            priority: Priority::P2,
        });

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_lenient_due_date_recovery() {
        let json = r#"{
            "id": "abc123",
            "task_name": "call client",
            "due_date": "not a date",
            "priority": "P2",
            "completed": false,
            "original_input": "call client P2",
            "created_at": "2025-06-13T12:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::P2);
    }

    #[test]
    fn test_lenient_due_date_non_string() {
        let json = r#"{
            "id": "abc123",
            "task_name": "call client",
            "due_date": 12345,
            "completed": false,
            "original_input": "call client P3",
            "created_at": "2025-06-13T12:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_optional_fields_omitted_in_json() {
        let task = Task::from_parsed(parsed("bare"));
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("assignee"));
        assert!(!json.contains("due_date"));
    }
}
