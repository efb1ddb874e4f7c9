//! Summary management functionality.
//!
//! This module handles summary formatting, naming conventions and the
//! per-summary text files on disk. Summaries are stored as individual UTF-8
//! `.txt` files named `<name>.txt` under the summaries directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Truncation point for saved summaries, in characters.
pub const SUMMARY_CHAR_LIMIT: usize = 1500;

/// Reformatting style applied to a summary before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryStyle {
    /// Verbatim truncated text.
    Normal,
    /// One arrow-prefixed line per sentence.
    Simplified,
    /// One bullet per sentence.
    Bullets,
}

/// Represents a saved summary with its name and file path.
#[derive(Debug, Clone)]
pub struct Summary {
    pub name: String,
    pub file_path: PathBuf,
}

impl Summary {
    /// Create a summary handle with the given display name.
    pub fn new(name: &str, summaries_dir: &Path) -> Self {
        let name = sanitise_summary_name(name);
        let file_path = summaries_dir.join(format!("{}.txt", name));
        Summary { name, file_path }
    }

    /// Load a summary handle from an existing file path.
    pub fn from_file(file_path: PathBuf) -> Option<Self> {
        if file_path.extension()?.to_str()? != "txt" {
            return None;
        }
        let name = file_path.file_stem()?.to_str()?.to_string();
        Some(Summary { name, file_path })
    }

    /// Read the summary content from disk.
    pub fn read(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.file_path)
    }
}

/// Convert a display name to a safe file name.
/// Converts to lowercase and collapses non-alphanumerics to underscores.
pub fn sanitise_summary_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Truncate and reformat document text into summary form.
///
/// Text beyond [`SUMMARY_CHAR_LIMIT`] characters is cut and marked with an
/// ellipsis; the style pass then rewrites sentence boundaries.
pub fn format_summary(text: &str, style: SummaryStyle) -> String {
    let truncated: String = if text.chars().count() > SUMMARY_CHAR_LIMIT {
        let mut s: String = text.chars().take(SUMMARY_CHAR_LIMIT).collect();
        s.push_str("...");
        s
    } else {
        text.to_string()
    };

    match style {
        SummaryStyle::Normal => truncated,
        SummaryStyle::Simplified => format!("➤ {}", truncated.replace(". ", "\n➤ ")),
        SummaryStyle::Bullets => format!("\n• {}", truncated.replace(". ", "\n• ")),
    }
}

/// Write a summary to disk, overwriting any previous file with that name.
pub fn save_summary(
    summaries_dir: &Path,
    name: &str,
    content: &str,
) -> std::io::Result<Summary> {
    let summary = Summary::new(name, summaries_dir);
    fs::write(&summary.file_path, content)?;
    Ok(summary)
}

/// Discover all saved summaries, sorted by name.
pub fn list_summaries(summaries_dir: &Path) -> std::io::Result<Vec<Summary>> {
    let mut summaries = Vec::new();

    if !summaries_dir.exists() {
        return Ok(summaries);
    }

    for entry in fs::read_dir(summaries_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(summary) = Summary::from_file(path) {
                summaries.push(summary);
            }
        }
    }

    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(summaries)
}

/// Load a summary's content by name.
pub fn load_summary(summaries_dir: &Path, name: &str) -> std::io::Result<String> {
    Summary::new(name, summaries_dir).read()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitise_summary_name() {
        assert_eq!(sanitise_summary_name("My Summary"), "my_summary");
        assert_eq!(sanitise_summary_name("Chapter-3_Notes"), "chapter_3_notes");
        assert_eq!(sanitise_summary_name("Special!@#$%Characters"), "special_characters");
        assert_eq!(sanitise_summary_name("  Multiple   Spaces  "), "multiple_spaces");
        assert_eq!(sanitise_summary_name(""), "");
    }

    #[test]
    fn test_format_summary_truncates_long_text() {
        let text = "a".repeat(SUMMARY_CHAR_LIMIT + 100);
        let formatted = format_summary(&text, SummaryStyle::Normal);
        assert!(formatted.ends_with("..."));
        assert_eq!(formatted.chars().count(), SUMMARY_CHAR_LIMIT + 3);

        let short = "short text";
        assert_eq!(format_summary(short, SummaryStyle::Normal), short);
    }

    #[test]
    fn test_format_summary_styles() {
        let text = "First point. Second point. End";
        assert_eq!(
            format_summary(text, SummaryStyle::Simplified),
            "➤ First point\n➤ Second point\n➤ End"
        );
        assert_eq!(
            format_summary(text, SummaryStyle::Bullets),
            "\n• First point\n• Second point\n• End"
        );
    }

    #[test]
    fn test_save_list_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        save_summary(dir.path(), "Chapter One", "alpha content").unwrap();
        save_summary(dir.path(), "Appendix", "beta content").unwrap();

        let listed = list_summaries(dir.path()).unwrap();
        let names: Vec<&str> = listed.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["appendix", "chapter_one"]);

        assert_eq!(
            load_summary(dir.path(), "Chapter One").unwrap(),
            "alpha content"
        );
    }

    #[test]
    fn test_list_summaries_on_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(list_summaries(&missing).unwrap().is_empty());
    }
}
