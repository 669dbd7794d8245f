pub mod dashboard;
pub mod entries;
pub mod filters;
pub mod forms;
pub mod todos;

pub use dashboard::render_dashboard;
pub use entries::{render_entries, render_entry_view};
pub use filters::{render_date_menu, render_filter_input, render_filter_summary};
pub use forms::{render_entry_form, render_todo_form};
pub use todos::render_todos;

/// Window of `len` rows that keeps `selected` visible in `height` lines,
/// centring the selection once the list is taller than the view.
pub(crate) fn list_window(selected: usize, len: usize, height: usize) -> (usize, usize) {
    if len <= height {
        return (0, len);
    }
    let half = height / 2;
    let start = selected.saturating_sub(half).min(len - height);
    (start, start + height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_window_fits() {
        assert_eq!(list_window(3, 5, 10), (0, 5));
    }

    #[test]
    fn test_list_window_centres_and_clamps() {
        assert_eq!(list_window(0, 100, 10), (0, 10));
        assert_eq!(list_window(50, 100, 10), (45, 55));
        assert_eq!(list_window(99, 100, 10), (90, 100));
    }
}
