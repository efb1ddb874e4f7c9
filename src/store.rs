//! Task store operations and utility functions for the study planner.
//!
//! This module provides the `TaskStore` struct owning the persisted task
//! document, along with utilities for due-date parsing, relative formatting
//! and table printing.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::task::{due_format, Task};

/// Failure while reading the persisted task document.
///
/// Read and parse failures stay distinct so callers can log what actually
/// went wrong before deciding to start from an empty list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse task file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure of a task store mutation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("no task with id {0}")]
    NotFound(u64),
}

/// In-memory task list backed by a single JSON document.
///
/// The store is the only component that reads or writes the document. Every
/// save overwrites the whole file; there is no partial update.
#[derive(Debug, Default)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the store from a JSON file.
    ///
    /// A missing file is a fresh empty store, not an error. Unreadable or
    /// malformed content is reported through `LoadError`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Ok(TaskStore::default());
        }
        let mut buf = String::new();
        File::open(path).and_then(|mut f| f.read_to_string(&mut buf))?;
        let tasks = serde_json::from_str(&buf)?;
        Ok(TaskStore { tasks })
    }

    /// Load the store, falling back to an empty list on any failure.
    ///
    /// This is the behaviour the interface surfaces rely on: a corrupt or
    /// unreadable document behaves like "no tasks yet". The underlying error
    /// is logged rather than discarded.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("could not load {}, starting fresh: {e}", path.display());
                TaskStore::default()
            }
        }
    }

    /// Save the store to a JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&self.tasks).unwrap();
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new task with `done = false` and return its ID.
    ///
    /// Empty or whitespace-only titles are rejected before anything changes,
    /// so a failed add never reaches the disk.
    pub fn add(&mut self, title: &str, due: NaiveDateTime) -> Result<u64, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            done: false,
            due,
        });
        Ok(id)
    }

    /// Mark the task with the given ID as done.
    pub fn mark_done(&mut self, id: u64) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.done = true;
        Ok(())
    }

    /// Remove the task with the given ID, returning it.
    pub fn delete(&mut self, id: u64) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    /// View of the tasks sorted ascending by due timestamp, then ID.
    ///
    /// Sorting is read-time only; the persisted document keeps insertion
    /// order.
    pub fn sorted_by_due(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by_key(|t| (t.due, t.id));
        view
    }

    /// Fraction of completed tasks as an integer percentage (floored).
    ///
    /// Zero when the list is empty.
    pub fn progress_percent(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.done).count();
        (done * 100 / self.tasks.len()) as u8
    }
}

/// Parse human-readable due input.
///
/// Supports:
/// - "today", "tomorrow"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD HH:MM:SS" and "YYYY-MM-DD HH:MM"
/// - bare "YYYY-MM-DD" (midnight)
pub fn parse_due_input(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return today.and_hms_opt(0, 0, 0),
        "tomorrow" => return (today + Duration::days(1)).and_hms_opt(0, 0, 0),
        _ => {}
    }

    // "in X" patterns
    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return (today + Duration::days(days)).and_hms_opt(0, 0, 0);
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return (today + Duration::weeks(weeks)).and_hms_opt(0, 0, 0);
            }
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, due_format::FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a due timestamp relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDateTime, today: NaiveDate) -> String {
    let delta = due.date() - today;
    if delta.num_days() == 0 {
        "today".into()
    } else if delta.num_days() == 1 {
        "tomorrow".into()
    } else if delta.num_days() > 1 {
        format!("in {}d", delta.num_days())
    } else {
        format!("{}d late", -delta.num_days())
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    // Header.
    println!("{:<5} {:<5} {:<20} {:<10} {}", "ID", "Done", "Due", "When", "Title");
    let today = Local::now().date_naive();
    for t in tasks {
        println!(
            "{:<5} {:<5} {:<20} {:<10} {}",
            t.id,
            if t.done { "[x]" } else { "[ ]" },
            t.due.format(due_format::FORMAT),
            format_due_relative(t.due, today),
            t.title
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, due_format::FORMAT).unwrap()
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let empty = TaskStore::default();
        empty.save(&path).unwrap();
        assert!(TaskStore::load(&path).unwrap().tasks.is_empty());

        let mut store = TaskStore::default();
        store.add("Read chapter 3", dt("2024-01-01 10:00:00")).unwrap();
        store.save(&path).unwrap();

        let loaded = TaskStore::load(&path).unwrap();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].title, "Read chapter 3");
        assert_eq!(loaded.tasks[0].due, dt("2024-01-01 10:00:00"));
        assert!(!loaded.tasks[0].done);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::load(&dir.path().join("nowhere.json")).unwrap();
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(TaskStore::load(&path), Err(LoadError::Parse(_))));
        // Caller-facing behaviour: corrupt file acts like an empty list.
        assert!(TaskStore::load_or_default(&path).tasks.is_empty());
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let mut store = TaskStore::default();
        assert!(matches!(
            store.add("", dt("2024-01-01 10:00:00")),
            Err(StoreError::EmptyTitle)
        ));
        assert!(matches!(
            store.add("   ", dt("2024-01-01 10:00:00")),
            Err(StoreError::EmptyTitle)
        ));
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_mark_done_and_delete_by_id() {
        let mut store = TaskStore::default();
        let a = store.add("Revise notes", dt("2024-01-01 09:00:00")).unwrap();
        let b = store.add("Practice paper", dt("2024-01-02 09:00:00")).unwrap();

        store.mark_done(a).unwrap();
        assert!(store.get(a).unwrap().done);
        assert!(!store.get(b).unwrap().done);

        let removed = store.delete(a).unwrap();
        assert_eq!(removed.id, a);
        assert!(store.get(a).is_none());
        assert!(matches!(store.mark_done(a), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(999), Err(StoreError::NotFound(999))));
    }

    #[test]
    fn test_progress_percent() {
        let mut store = TaskStore::default();
        assert_eq!(store.progress_percent(), 0);

        let a = store.add("One", dt("2024-01-01 09:00:00")).unwrap();
        store.add("Two", dt("2024-01-02 09:00:00")).unwrap();
        store.mark_done(a).unwrap();
        assert_eq!(store.progress_percent(), 50);

        store.add("Three", dt("2024-01-03 09:00:00")).unwrap();
        // 1 of 3 done floors to 33.
        assert_eq!(store.progress_percent(), 33);
    }

    #[test]
    fn test_sorted_view_keeps_insertion_order_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut store = TaskStore::default();
        store.add("February task", dt("2024-02-01 09:00:00")).unwrap();
        store.add("January task", dt("2024-01-01 09:00:00")).unwrap();

        let view = store.sorted_by_due();
        assert_eq!(view[0].title, "January task");
        assert_eq!(view[1].title, "February task");

        store.save(&path).unwrap();
        let loaded = TaskStore::load(&path).unwrap();
        assert_eq!(loaded.tasks[0].title, "February task");
        assert_eq!(loaded.tasks[1].title, "January task");
    }

    #[test]
    fn test_due_serialises_in_fixed_format() {
        let mut store = TaskStore::default();
        store.add("Read chapter 3", dt("2024-01-01 10:00:00")).unwrap();
        let json = serde_json::to_string_pretty(&store.tasks).unwrap();
        assert!(json.contains("\"2024-01-01 10:00:00\""));
    }

    #[test]
    fn test_parse_due_input_formats() {
        assert_eq!(
            parse_due_input("2024-01-01 10:00:00"),
            Some(dt("2024-01-01 10:00:00"))
        );
        assert_eq!(
            parse_due_input("2024-01-01 10:00"),
            Some(dt("2024-01-01 10:00:00"))
        );
        assert_eq!(parse_due_input("2024-01-01"), Some(dt("2024-01-01 00:00:00")));
        assert_eq!(parse_due_input("not a date"), None);

        let today = Local::now().date_naive();
        assert_eq!(parse_due_input("today"), today.and_hms_opt(0, 0, 0));
        assert_eq!(
            parse_due_input("in 3d"),
            (today + Duration::days(3)).and_hms_opt(0, 0, 0)
        );
    }
}
