//! Deterministic display order and filtering for entries and todos.
//!
//! Everything here is pure: callers pass `now` explicitly so date windows are
//! reproducible.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Local};

use crate::content::normalize_tag;
use crate::models::{ActiveFilter, DatePreset, Entry, Tagged, Timestamped, Todo, TodoStatus};

// =============================================================================
// Sorting
// =============================================================================

fn compare_todos(a: &Todo, b: &Todo) -> Ordering {
    a.status
        .rank()
        .cmp(&b.status.rank())
        .then(a.position.cmp(&b.position))
        .then(b.created_at.cmp(&a.created_at))
}

/// Sort todos in place: next, open, done; then position; then newest first.
/// `sort_by` is stable, so fully tied records keep their stored order.
pub fn sort_todos(todos: &mut [Todo]) {
    todos.sort_by(compare_todos);
}

pub fn sorted_todos(todos: &[Todo]) -> Vec<Todo> {
    let mut sorted = todos.to_vec();
    sort_todos(&mut sorted);
    sorted
}

/// Newest entry first, stable for equal timestamps.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

pub fn sorted_entries(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sort_entries(&mut sorted);
    sorted
}

/// Renumber positions 0..n-1 in the current slice order.
pub fn normalize_positions(todos: &mut [Todo]) {
    for (i, todo) in todos.iter_mut().enumerate() {
        todo.position = i as i64;
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// True when `item` carries every requested tag. Requested tags may include "@".
pub fn has_all_tags<T: Tagged, S: AsRef<str>>(item: &T, requested: &[S]) -> bool {
    requested.iter().all(|tag| {
        let tag = normalize_tag(tag.as_ref());
        tag.is_empty() || item.tags().contains(&tag)
    })
}

pub fn filter_by_tags<'a, T: Tagged, S: AsRef<str>>(items: &'a [T], requested: &[S]) -> Vec<&'a T> {
    items.iter().filter(|item| has_all_tags(*item, requested)).collect()
}

pub fn filter_by_date<'a, T: Timestamped>(
    items: &'a [T],
    preset: Option<DatePreset>,
    now: DateTime<Local>,
) -> Vec<&'a T> {
    match preset {
        None => items.iter().collect(),
        Some(preset) => {
            let range = preset.range(now);
            items.iter().filter(|item| range.contains(item.timestamp())).collect()
        }
    }
}

/// Tag and date constraints together, preserving input order.
pub fn apply_filter<'a, T: Tagged + Timestamped>(
    items: &'a [T],
    filter: &ActiveFilter,
    now: DateTime<Local>,
) -> Vec<&'a T> {
    let range = filter.date.map(|preset| preset.range(now));
    items
        .iter()
        .filter(|item| filter.tags.iter().all(|t| item.tags().contains(t)))
        .filter(|item| range.map_or(true, |r| r.contains(item.timestamp())))
        .collect()
}

// =============================================================================
// Reordering
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Full collection in display order with normalized positions; the moved
    /// todo and its neighbour have swapped.
    Moved(Vec<Todo>),
    /// Unknown id, same id twice, or the two todos differ in status.
    Unchanged,
}

/// The todo next to `id` in an already filtered display list, if it shares
/// `id`'s status. Hidden todos never count as neighbours.
pub fn visible_neighbour<'a>(
    visible: &[&'a Todo],
    id: &str,
    direction: MoveDirection,
) -> Option<&'a Todo> {
    let index = visible.iter().position(|t| t.id == id)?;
    let neighbour = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => index + 1,
    };
    let candidate = *visible.get(neighbour)?;
    (candidate.status == visible[index].status).then_some(candidate)
}

/// Swap the positions of exactly two todos of the same status. Everything
/// else keeps its place in display order.
pub fn move_todo(todos: &[Todo], id: &str, neighbour_id: &str) -> MoveOutcome {
    if id == neighbour_id {
        return MoveOutcome::Unchanged;
    }
    let mut sorted = sorted_todos(todos);
    normalize_positions(&mut sorted);

    let Some(index) = sorted.iter().position(|t| t.id == id) else {
        return MoveOutcome::Unchanged;
    };
    let Some(neighbour) = sorted.iter().position(|t| t.id == neighbour_id) else {
        return MoveOutcome::Unchanged;
    };
    if sorted[neighbour].status != sorted[index].status {
        return MoveOutcome::Unchanged;
    }

    let moved_position = sorted[index].position;
    sorted[index].position = sorted[neighbour].position;
    sorted[neighbour].position = moved_position;
    sorted.swap(index, neighbour);
    MoveOutcome::Moved(sorted)
}

// =============================================================================
// Joins and counts
// =============================================================================

/// Todos whose `entry_id` points at `entry_id`, in display order.
pub fn todos_for_entry<'a>(todos: &'a [Todo], entry_id: &str) -> Vec<&'a Todo> {
    let mut linked: Vec<&Todo> = todos
        .iter()
        .filter(|t| t.entry_id.as_deref() == Some(entry_id))
        .collect();
    linked.sort_by(|a, b| compare_todos(a, b));
    linked
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub open: usize,
    pub next: usize,
    pub done: usize,
}

impl TodoCounts {
    pub fn from_todos<'a, I: IntoIterator<Item = &'a Todo>>(todos: I) -> Self {
        let mut counts = Self::default();
        for todo in todos {
            match todo.status {
                TodoStatus::Open => counts.open += 1,
                TodoStatus::Next => counts.next += 1,
                TodoStatus::Done => counts.done += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.open + self.next + self.done
    }

    /// Open plus next
    pub fn pending(&self) -> usize {
        self.open + self.next
    }
}

/// Every tag used by any entry or todo, "@"-prefixed and sorted.
pub fn unique_tags(entries: &[Entry], todos: &[Todo]) -> Vec<String> {
    let tags: BTreeSet<&String> = entries
        .iter()
        .flat_map(|e| e.tags.iter())
        .chain(todos.iter().flat_map(|t| t.tags.iter()))
        .collect();
    tags.into_iter().map(|t| format!("@{}", t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap()
    }

    fn todo(id: &str, status: TodoStatus, position: i64, minutes: i64) -> Todo {
        let mut t = Todo::new(id, None, position, base() + Duration::minutes(minutes));
        t.id = id.to_string();
        t.status = status;
        t
    }

    fn ids(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_todos_by_status_position_then_newest() {
        let todos = vec![
            todo("done", TodoStatus::Done, 0, 0),
            todo("open-late", TodoStatus::Open, 1, 0),
            todo("open-old", TodoStatus::Open, 0, 0),
            todo("open-new", TodoStatus::Open, 0, 5),
            todo("next", TodoStatus::Next, 9, 0),
        ];
        let sorted = sorted_todos(&todos);
        assert_eq!(ids(&sorted), vec!["next", "open-new", "open-old", "open-late", "done"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let todos = vec![
            todo("a", TodoStatus::Open, 0, 0),
            todo("b", TodoStatus::Open, 0, 0),
            todo("c", TodoStatus::Open, 0, 0),
        ];
        let once = sorted_todos(&todos);
        assert_eq!(ids(&once), vec!["a", "b", "c"]);
        let twice = sorted_todos(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_entries_newest_first() {
        let mut old = Entry::from_content("old", base());
        old.id = "old".into();
        let mut new = Entry::from_content("new", base() + Duration::hours(1));
        new.id = "new".into();
        let sorted = sorted_entries(&[old, new]);
        assert_eq!(sorted[0].id, "new");
        assert_eq!(sorted[1].id, "old");
    }

    #[test]
    fn test_tag_filter_is_and_with_optional_at() {
        let a = Entry::from_content("x @work @client", base());
        let b = Entry::from_content("x @work", base());
        let entries = vec![a.clone(), b.clone()];

        assert_eq!(filter_by_tags(&entries, &["@work"]).len(), 2);
        let both = filter_by_tags(&entries, &["work", "@Client"]);
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, a.id);
        let none: [&str; 0] = [];
        assert_eq!(filter_by_tags(&entries, &none).len(), 2);
    }

    #[test]
    fn test_date_filter_today_and_yesterday() {
        let now = base();
        let today = Entry::from_content("today", now - Duration::hours(1));
        let yesterday = Entry::from_content("yesterday", now - Duration::days(1));
        let older = Entry::from_content("older", now - Duration::days(3));
        let entries = vec![today.clone(), yesterday.clone(), older];

        let kept = filter_by_date(&entries, Some(DatePreset::Today), now);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, today.id);

        let kept = filter_by_date(&entries, Some(DatePreset::Yesterday), now);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, yesterday.id);

        assert_eq!(filter_by_date(&entries, None, now).len(), 3);
    }

    #[test]
    fn test_apply_filter_combines_tags_and_date() {
        let now = base();
        let hit = Entry::from_content("@work", now - Duration::days(2));
        let too_old = Entry::from_content("@work", now - Duration::days(40));
        let wrong_tag = Entry::from_content("@home", now);
        let entries = vec![hit.clone(), too_old, wrong_tag];

        let filter = ActiveFilter::new(["@work"], Some(DatePreset::Last30Days));
        let kept = apply_filter(&entries, &filter, now);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, hit.id);
    }

    #[test]
    fn test_move_within_status_group() {
        let todos = vec![
            todo("n1", TodoStatus::Next, 5, 0),
            todo("o1", TodoStatus::Open, 3, 0),
            todo("o2", TodoStatus::Open, 7, 0),
            todo("d1", TodoStatus::Done, 0, 0),
        ];

        let MoveOutcome::Moved(moved) = move_todo(&todos, "o2", "o1") else {
            panic!("expected a move");
        };
        assert_eq!(ids(&moved), vec!["n1", "o2", "o1", "d1"]);
        let positions: Vec<i64> = moved.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(sorted_todos(&moved), moved);
    }

    #[test]
    fn test_move_across_statuses_is_unchanged() {
        let todos = vec![
            todo("n1", TodoStatus::Next, 0, 0),
            todo("o1", TodoStatus::Open, 1, 0),
            todo("o2", TodoStatus::Open, 2, 0),
            todo("d1", TodoStatus::Done, 3, 0),
        ];
        assert_eq!(move_todo(&todos, "o1", "n1"), MoveOutcome::Unchanged);
        assert_eq!(move_todo(&todos, "o2", "d1"), MoveOutcome::Unchanged);
        assert_eq!(move_todo(&todos, "o1", "o1"), MoveOutcome::Unchanged);
        assert_eq!(move_todo(&todos, "missing", "o1"), MoveOutcome::Unchanged);
        assert_eq!(move_todo(&todos, "o1", "missing"), MoveOutcome::Unchanged);
    }

    #[test]
    fn test_move_past_hidden_todo_keeps_its_slot() {
        let todos = vec![
            todo("a", TodoStatus::Open, 0, 0),
            todo("b", TodoStatus::Open, 1, 0),
            todo("c", TodoStatus::Open, 2, 0),
        ];

        let MoveOutcome::Moved(moved) = move_todo(&todos, "c", "a") else {
            panic!("expected a move");
        };
        assert_eq!(ids(&moved), vec!["c", "b", "a"]);
        assert_eq!(moved[1].position, 1);
    }

    #[test]
    fn test_visible_neighbour_skips_other_statuses_and_edges() {
        let todos = vec![
            todo("n1", TodoStatus::Next, 0, 0),
            todo("o1", TodoStatus::Open, 1, 0),
            todo("o2", TodoStatus::Open, 2, 0),
        ];
        let visible: Vec<&Todo> = todos.iter().collect();

        let up = visible_neighbour(&visible, "o2", MoveDirection::Up).map(|t| t.id.as_str());
        assert_eq!(up, Some("o1"));
        assert!(visible_neighbour(&visible, "o1", MoveDirection::Up).is_none());
        assert!(visible_neighbour(&visible, "o2", MoveDirection::Down).is_none());
        assert!(visible_neighbour(&visible, "n1", MoveDirection::Up).is_none());
        assert!(visible_neighbour(&visible, "missing", MoveDirection::Down).is_none());
    }

    #[test]
    fn test_todos_for_entry_and_dangling_lookup() {
        let mut linked = todo("t1", TodoStatus::Open, 0, 0);
        linked.entry_id = Some("e1".into());
        let mut dangling = todo("t2", TodoStatus::Open, 1, 0);
        dangling.entry_id = Some("gone".into());
        let todos = vec![linked, dangling.clone()];

        assert_eq!(todos_for_entry(&todos, "e1").len(), 1);
        assert!(todos_for_entry(&todos, "gone")
            .iter()
            .all(|t| t.id == dangling.id));
    }

    #[test]
    fn test_counts_and_unique_tags() {
        let todos = vec![
            todo("a", TodoStatus::Open, 0, 0),
            todo("b", TodoStatus::Next, 0, 0),
            todo("c", TodoStatus::Done, 0, 0),
            todo("d", TodoStatus::Open, 0, 0),
        ];
        let counts = TodoCounts::from_todos(&todos);
        assert_eq!(counts.open, 2);
        assert_eq!(counts.pending(), 3);
        assert_eq!(counts.total(), 4);

        let entries = vec![Entry::from_content("@zeta @alpha", base())];
        let tagged = vec![Todo::new("call @alpha @beta", None, 0, base())];
        assert_eq!(unique_tags(&entries, &tagged), vec!["@alpha", "@beta", "@zeta"]);
    }
}
