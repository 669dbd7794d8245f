//! Application-wide constants
//!
//! File names, timeouts and window sizes shared by the core and the TUI.

/// Directory created under the user's home for all persisted data
pub const DATA_DIR_NAME: &str = ".daybook";

pub const ENTRIES_FILE: &str = "entries.json";
pub const TODOS_FILE: &str = "todos.json";
pub const LOG_FILE: &str = "daybook.log";

/// How long a transient status message stays on screen
pub const STATUS_TIMEOUT_SECS: u64 = 3;

/// Number of ISO weeks shown in the dashboard activity chart
pub const DASHBOARD_WEEKS: usize = 8;

/// Window used by the "recent entries" dashboard counter
pub const RECENT_ENTRY_DAYS: i64 = 7;

/// Example shown when a filter string cannot be parsed
pub const FILTER_HINT: &str = "e.g. @work yesterday, last 30 days @client";

/// Marker that turns a line of entry text into a todo
pub const TASK_MARKER: &str = "!todo";
