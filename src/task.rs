//! Task data structure for the study planner.
//!
//! This module defines the `Task` struct that represents a single study item
//! with its completion flag and due timestamp, plus the serde adapter that
//! pins the on-disk timestamp format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A study to-do item.
///
/// Tasks carry a stable `id` so mark-done and delete address a specific task
/// rather than a list position, which goes stale as the sorted view reorders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub done: bool,
    #[serde(with = "due_format")]
    pub due: NaiveDateTime,
}

/// Serde adapter storing `due` as a `"YYYY-MM-DD HH:MM:SS"` string.
///
/// Lexicographic order on this format matches chronological order, so the
/// persisted document stays sortable by eye and by external tools.
pub mod due_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(due: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&due.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
