pub mod date_filter;
pub mod entry;
pub mod filter;
pub mod todo;

pub use date_filter::{DatePreset, DateRange};
pub use entry::Entry;
pub use filter::ActiveFilter;
pub use todo::{Todo, TodoStatus};

use std::collections::BTreeSet;

use chrono::{DateTime, Local};

/// Records that carry a derived tag set.
pub trait Tagged {
    fn tags(&self) -> &BTreeSet<String>;
}

/// Records with a single timestamp used for date filtering and weekly stats.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Local>;
}

/// Records addressed by an opaque string id in their collection file.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Generate a fresh record id
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
