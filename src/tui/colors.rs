//! Color constants for the terminal user interface.

use ratatui::style::Color;

// These keep the planner and quiz screens on a shared palette.

/// Used for completed tasks
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for overdue tasks
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for the progress gauge
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for the quote banner
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);
