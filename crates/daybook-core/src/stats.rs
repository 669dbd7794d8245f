//! Weekly activity buckets and dashboard counters.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Weekday};

use crate::constants::RECENT_ENTRY_DAYS;
use crate::models::{Entry, Timestamped, Todo};
use crate::ordering::TodoCounts;

/// Counts for one ISO-8601 week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub year: i32,
    pub week: u32,
    /// "W07"
    pub label: String,
    pub entry_count: usize,
    pub todo_count: usize,
}

impl WeekBucket {
    fn empty(year: i32, week: u32) -> Self {
        Self {
            year,
            week,
            label: week_label(week),
            entry_count: 0,
            todo_count: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.entry_count + self.todo_count
    }
}

pub fn week_label(week: u32) -> String {
    format!("W{:02}", week)
}

fn iso_key<T: Timestamped>(item: &T) -> (i32, u32) {
    let week = item.timestamp().iso_week();
    (week.year(), week.week())
}

/// Monday of the given ISO week, if it exists.
fn iso_monday(year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}

/// Bucket entries (by timestamp) and todos (by creation time) into ISO weeks.
///
/// Always returns exactly `n` contiguous weeks, oldest first, ending at the most
/// recent week with data, or at the week containing `today` when there is none.
/// Weeks are stepped back seven days at a time from that week's Monday, so year
/// boundaries follow the ISO calendar (52 or 53 weeks).
pub fn aggregate_by_week(
    entries: &[Entry],
    todos: &[Todo],
    n: usize,
    today: NaiveDate,
) -> Vec<WeekBucket> {
    let mut counts: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();
    for entry in entries {
        counts.entry(iso_key(entry)).or_default().0 += 1;
    }
    for todo in todos {
        counts.entry(iso_key(todo)).or_default().1 += 1;
    }

    let today_week = today.iso_week();
    let (latest_year, latest_week) = counts
        .keys()
        .next_back()
        .copied()
        .unwrap_or((today_week.year(), today_week.week()));
    let Some(latest_monday) = iso_monday(latest_year, latest_week) else {
        return Vec::new();
    };

    let mut buckets: Vec<WeekBucket> = (0..n)
        .filter_map(|i| latest_monday.checked_sub_signed(Duration::weeks(i as i64)))
        .map(|monday| {
            let week = monday.iso_week();
            let mut bucket = WeekBucket::empty(week.year(), week.week());
            if let Some((entry_count, todo_count)) = counts.get(&(week.year(), week.week())) {
                bucket.entry_count = *entry_count;
                bucket.todo_count = *todo_count;
            }
            bucket
        })
        .collect();
    buckets.reverse();
    buckets
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_entries: usize,
    pub recent_entries: usize,
    /// Most used tag across entries and todos with its use count
    pub top_tag: Option<(String, usize)>,
    pub total_todos: usize,
    pub pending_todos: usize,
}

impl DashboardSummary {
    pub fn compute(entries: &[Entry], todos: &[Todo], now: DateTime<Local>) -> Self {
        let cutoff = now - Duration::days(RECENT_ENTRY_DAYS);
        let recent_entries = entries.iter().filter(|e| e.timestamp > cutoff).count();

        let mut tag_counts: HashMap<&str, usize> = HashMap::new();
        for tag in entries
            .iter()
            .flat_map(|e| e.tags.iter())
            .chain(todos.iter().flat_map(|t| t.tags.iter()))
        {
            *tag_counts.entry(tag.as_str()).or_default() += 1;
        }
        // highest count wins, alphabetical on ties
        let top_tag = tag_counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(tag, count)| (tag.to_string(), count));

        Self {
            total_entries: entries.len(),
            recent_entries,
            top_tag,
            total_todos: todos.len(),
            pending_todos: TodoCounts::from_todos(todos).pending(),
        }
    }

    pub fn top_tag_display(&self) -> String {
        match &self.top_tag {
            Some((tag, count)) => format!("@{}: {} uses", tag, count),
            None => "none".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_on(date: NaiveDate) -> Entry {
        let ts = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap();
        Entry::from_content("entry", ts)
    }

    fn todo_on(date: NaiveDate) -> Todo {
        let ts = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .unwrap();
        Todo::new("todo", None, 0, ts)
    }

    fn week_day(year: i32, week: u32, day: Weekday) -> NaiveDate {
        NaiveDate::from_isoywd_opt(year, week, day).unwrap()
    }

    #[test]
    fn test_no_data_returns_n_zero_weeks_ending_today() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        let buckets = aggregate_by_week(&[], &[], 8, today);
        assert_eq!(buckets.len(), 8);
        assert!(buckets.iter().all(|b| b.total() == 0));
        let last = buckets.last().unwrap();
        assert_eq!((last.year, last.week), (2024, today.iso_week().week()));
        assert_eq!(buckets.first().unwrap().week, today.iso_week().week() - 7);
    }

    #[test]
    fn test_fills_gaps_and_orders_oldest_first() {
        let entries = vec![
            entry_on(week_day(2024, 41, Weekday::Tue)),
            entry_on(week_day(2024, 42, Weekday::Wed)),
            entry_on(week_day(2024, 43, Weekday::Mon)),
            entry_on(week_day(2024, 43, Weekday::Sun)),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 10, 30).unwrap();
        let buckets = aggregate_by_week(&entries, &[], 8, today);

        assert_eq!(buckets.len(), 8);
        let weeks: Vec<u32> = buckets.iter().map(|b| b.week).collect();
        assert_eq!(weeks, vec![36, 37, 38, 39, 40, 41, 42, 43]);
        let counts: Vec<usize> = buckets.iter().map(|b| b.entry_count).collect();
        assert_eq!(counts, vec![0, 0, 0, 0, 0, 1, 1, 2]);
        assert_eq!(buckets[7].label, "W43");
    }

    #[test]
    fn test_todos_counted_by_creation_week() {
        let todos = vec![todo_on(week_day(2024, 10, Weekday::Fri))];
        let entries = vec![entry_on(week_day(2024, 9, Weekday::Fri))];
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let buckets = aggregate_by_week(&entries, &todos, 2, today);
        assert_eq!(buckets[0].week, 9);
        assert_eq!(buckets[0].entry_count, 1);
        assert_eq!(buckets[1].week, 10);
        assert_eq!(buckets[1].todo_count, 1);
        assert_eq!(buckets[1].label, "W10");
    }

    #[test]
    fn test_rolls_back_into_a_53_week_year() {
        // 2020 has 53 ISO weeks
        let entries = vec![entry_on(week_day(2021, 2, Weekday::Mon))];
        let today = NaiveDate::from_ymd_opt(2021, 1, 20).unwrap();
        let buckets = aggregate_by_week(&entries, &[], 4, today);
        let keys: Vec<(i32, u32)> = buckets.iter().map(|b| (b.year, b.week)).collect();
        assert_eq!(keys, vec![(2020, 52), (2020, 53), (2021, 1), (2021, 2)]);
    }

    #[test]
    fn test_rolls_back_into_a_52_week_year() {
        let entries = vec![entry_on(week_day(2024, 1, Weekday::Wed))];
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let buckets = aggregate_by_week(&entries, &[], 2, today);
        let keys: Vec<(i32, u32)> = buckets.iter().map(|b| (b.year, b.week)).collect();
        assert_eq!(keys, vec![(2023, 52), (2024, 1)]);
    }

    #[test]
    fn test_dashboard_summary() {
        let now = Local.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap();
        let entries = vec![
            Entry::from_content("@work @home", now - Duration::days(1)),
            Entry::from_content("@work", now - Duration::days(10)),
        ];
        let mut done = Todo::new("ship @home", None, 0, now);
        done.status = crate::models::TodoStatus::Done;
        let todos = vec![Todo::new("call", None, 1, now), done];

        let summary = DashboardSummary::compute(&entries, &todos, now);
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.recent_entries, 1);
        // work and home both have 2 uses, alphabetical tie-break picks home
        assert_eq!(summary.top_tag, Some(("home".to_string(), 2)));
        assert_eq!(summary.total_todos, 2);
        assert_eq!(summary.pending_todos, 1);
        assert_eq!(summary.top_tag_display(), "@home: 2 uses");
    }

    #[test]
    fn test_dashboard_summary_without_tags() {
        let now = Local.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap();
        let summary = DashboardSummary::compute(&[], &[], now);
        assert_eq!(summary.top_tag_display(), "none");
    }
}
