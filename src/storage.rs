//! Task list storage - JSON file persistence

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::task::Task;

pub const DEFAULT_PROFILE: &str = "default";

const APP_DIR: &str = ".taskflow";

/// Application data directory (~/.taskflow), created on first use
pub fn get_app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(APP_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create app directory {:?}", dir))?;
    Ok(dir)
}

/// Data directory for one profile (~/.taskflow/profiles/<name>)
pub fn get_profile_dir(profile: &str) -> Result<PathBuf> {
    let dir = get_app_dir()?.join("profiles").join(profile);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create profile directory {:?}", dir))?;
    Ok(dir)
}

/// Names of all profiles with a data directory, sorted.
pub fn list_profiles() -> Result<Vec<String>> {
    let profiles_dir = get_app_dir()?.join("profiles");
    if !profiles_dir.exists() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in fs::read_dir(&profiles_dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            profiles.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    profiles.sort();
    Ok(profiles)
}

/// Profile-scoped task list, read and written wholesale. The list is
/// ordered newest first; `add` prepends.
pub struct Storage {
    profile: String,
    tasks_path: PathBuf,
}

impl Storage {
    pub fn new(profile: &str) -> Result<Self> {
        let profile_name = if profile.is_empty() {
            DEFAULT_PROFILE.to_string()
        } else {
            profile.to_string()
        };

        let profile_dir = get_profile_dir(&profile_name)?;
        let tasks_path = profile_dir.join("tasks.json");

        Ok(Self {
            profile: profile_name,
            tasks_path,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.tasks_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.tasks_path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(tasks)
    }

    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        // Create backup
        if self.tasks_path.exists() {
            let backup_path = self.tasks_path.with_extension("json.bak");
            if let Err(e) = fs::copy(&self.tasks_path, &backup_path) {
                warn!("Failed to create backup: {}", e);
            }
        }

        let content = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.tasks_path, content)?;
        Ok(())
    }

    /// Prepend a task so the list stays newest-first
    pub fn add(&self, task: Task) -> Result<()> {
        let mut tasks = self.load()?;
        tasks.insert(0, task);
        self.save(&tasks)
    }

    /// Prepend a batch, preserving the batch's own order at the front
    pub fn add_all(&self, new_tasks: Vec<Task>) -> Result<()> {
        let mut tasks = self.load()?;
        for task in new_tasks.into_iter().rev() {
            tasks.insert(0, task);
        }
        self.save(&tasks)
    }

    /// Toggle completion for the task with this exact ID
    pub fn toggle(&self, id: &str) -> Result<Task> {
        let mut tasks = self.load()?;
        let task = match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.toggle_completed();
                task.clone()
            }
            None => bail!("Task not found: {}", id),
        };
        self.save(&tasks)?;
        Ok(task)
    }

    /// Delete the task with this exact ID
    pub fn remove(&self, id: &str) -> Result<Task> {
        let mut tasks = self.load()?;
        let pos = match tasks.iter().position(|t| t.id == id) {
            Some(pos) => pos,
            None => bail!("Task not found: {}", id),
        };
        let removed = tasks.remove(pos);
        self.save(&tasks)?;
        Ok(removed)
    }

    /// Drop all completed tasks, returning how many were removed
    pub fn clear_completed(&self) -> Result<usize> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| !t.completed);
        let removed = before - tasks.len();
        if removed > 0 {
            self.save(&tasks)?;
        }
        Ok(removed)
    }

    #[cfg(test)]
    pub(crate) fn tasks_path(&self) -> &std::path::Path {
        &self.tasks_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{ParsedTask, Priority};
    use serial_test::serial;
    use tempfile::tempdir;

    fn make_task(name: &str) -> Task {
        Task::from_parsed(ParsedTask {
            task_name: name.to_string(),
            assignee: None,
            due_date: None,
            priority: Priority::default(),
        })
    }

    #[test]
    #[serial]
    fn test_storage_roundtrip() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-profile")?;

        let tasks = vec![make_task("first"), make_task("second")];
        storage.save(&tasks)?;
        let loaded = storage.load()?;

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].task_name, "first");
        assert_eq!(loaded[1].task_name, "second");

        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_new_with_empty_profile() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("")?;
        assert_eq!(storage.profile(), "default");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_load_nonexistent_file() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-empty")?;
        assert!(storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_load_empty_file() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-empty-file")?;
        fs::write(storage.tasks_path(), "")?;

        assert!(storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_load_whitespace_only_file() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-whitespace")?;
        fs::write(storage.tasks_path(), "   \n  \t  ")?;

        assert!(storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_load_invalid_json() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-invalid")?;
        fs::write(storage.tasks_path(), "{ invalid json }")?;

        assert!(storage.load().is_err());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_recovers_malformed_due_date() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-bad-date")?;
        let json = r#"[{
            "id": "deadbeefdeadbeef",
            "task_name": "call client",
            "due_date": "banana",
            "priority": "P2",
            "completed": false,
            "original_input": "call client P2",
            "created_at": "2025-06-13T12:00:00Z"
        }]"#;
        fs::write(storage.tasks_path(), json)?;

        let loaded = storage.load()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].due_date, None);
        assert_eq!(loaded[0].task_name, "call client");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_save_creates_backup() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-backup")?;

        storage.save(&[make_task("first")])?;
        storage.save(&[make_task("second")])?;

        let backup_path = storage.tasks_path().with_extension("json.bak");
        assert!(backup_path.exists());

        let backup_content = fs::read_to_string(&backup_path)?;
        assert!(backup_content.contains("first"));
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_save_empty_array() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-empty-save")?;
        storage.save(&[])?;

        let content = fs::read_to_string(storage.tasks_path())?;
        assert_eq!(content.trim(), "[]");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_add_prepends() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-add")?;
        storage.add(make_task("older"))?;
        storage.add(make_task("newer"))?;

        let loaded = storage.load()?;
        assert_eq!(loaded[0].task_name, "newer");
        assert_eq!(loaded[1].task_name, "older");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_add_all_keeps_batch_order() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-add-all")?;
        storage.add(make_task("existing"))?;
        storage.add_all(vec![make_task("one"), make_task("two")])?;

        let loaded = storage.load()?;
        let names: Vec<&str> = loaded.iter().map(|t| t.task_name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "existing"]);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_toggle() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-toggle")?;
        let task = make_task("flip me");
        let id = task.id.clone();
        storage.add(task)?;

        let toggled = storage.toggle(&id)?;
        assert!(toggled.completed);
        assert!(storage.load()?[0].completed);

        let toggled = storage.toggle(&id)?;
        assert!(!toggled.completed);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_toggle_unknown_id() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-toggle-missing")?;
        assert!(storage.toggle("nope").is_err());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_remove() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-remove")?;
        let task = make_task("goner");
        let id = task.id.clone();
        storage.add(task)?;
        storage.add(make_task("keeper"))?;

        let removed = storage.remove(&id)?;
        assert_eq!(removed.task_name, "goner");

        let loaded = storage.load()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].task_name, "keeper");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_clear_completed() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage = Storage::new("test-clear")?;
        let done = make_task("done");
        let done_id = done.id.clone();
        storage.add(done)?;
        storage.add(make_task("pending"))?;
        storage.toggle(&done_id)?;

        let removed = storage.clear_completed()?;
        assert_eq!(removed, 1);

        let loaded = storage.load()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].task_name, "pending");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_storage_profiles_are_isolated() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        let storage1 = Storage::new("profile-alpha")?;
        let storage2 = Storage::new("profile-beta")?;

        storage1.add(make_task("alpha task"))?;

        assert_eq!(storage1.load()?.len(), 1);
        assert!(storage2.load()?.is_empty());
        assert_ne!(storage1.tasks_path(), storage2.tasks_path());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_list_profiles_sorted() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        Storage::new("zeta")?;
        Storage::new("alpha")?;

        let profiles = list_profiles()?;
        assert_eq!(profiles, vec!["alpha".to_string(), "zeta".to_string()]);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_list_profiles_empty_when_no_profiles_dir() -> Result<()> {
        let temp = tempdir()?;
        std::env::set_var("HOME", temp.path());

        assert!(list_profiles()?.is_empty());
        Ok(())
    }
}
