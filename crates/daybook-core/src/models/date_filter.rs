use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Relative date windows offered by the filter menu and the free-text parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Last60Days,
    Last90Days,
    Last365Days,
}

/// A resolved window. `end` is inclusive unless `end_exclusive` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub end_exclusive: bool,
}

impl DateRange {
    pub fn contains(&self, ts: DateTime<Local>) -> bool {
        if ts < self.start {
            return false;
        }
        if self.end_exclusive {
            ts < self.end
        } else {
            ts <= self.end
        }
    }
}

impl DatePreset {
    pub const ALL: [DatePreset; 7] = [
        Self::Today,
        Self::Yesterday,
        Self::Last7Days,
        Self::Last30Days,
        Self::Last60Days,
        Self::Last90Days,
        Self::Last365Days,
    ];

    /// Calendar days between today's midnight and the window start
    pub fn days_back(&self) -> u64 {
        match self {
            Self::Today => 0,
            Self::Yesterday => 1,
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last60Days => 60,
            Self::Last90Days => 90,
            Self::Last365Days => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last60Days => "Last 60 days",
            Self::Last90Days => "Last 90 days",
            Self::Last365Days => "Last 365 days",
        }
    }

    /// Lowercase phrase as typed into the free-text filter
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7Days => "last 7 days",
            Self::Last30Days => "last 30 days",
            Self::Last60Days => "last 60 days",
            Self::Last90Days => "last 90 days",
            Self::Last365Days => "last 365 days",
        }
    }

    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let phrase = phrase.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.phrase() == phrase)
    }

    /// Resolve the window relative to `now`.
    pub fn range(&self, now: DateTime<Local>) -> DateRange {
        let today = now.date_naive();
        let start_day = today
            .checked_sub_days(Days::new(self.days_back()))
            .unwrap_or(NaiveDate::MIN);
        let start = local_midnight(start_day);

        match self {
            Self::Yesterday => DateRange {
                start,
                end: local_midnight(today),
                end_exclusive: true,
            },
            _ => DateRange {
                start,
                end: now,
                end_exclusive: false,
            },
        }
    }
}

/// Local midnight of `date`. Falls back to interpreting the time as UTC when the
/// local midnight does not exist (DST gap).
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_today_starts_at_midnight_and_ends_now() {
        let now = local(2024, 10, 14, 15, 30);
        let range = DatePreset::Today.range(now);
        assert_eq!(range.start, local(2024, 10, 14, 0, 0));
        assert_eq!(range.end, now);
        assert!(range.contains(now));
        assert!(range.contains(local(2024, 10, 14, 0, 0)));
        assert!(!range.contains(local(2024, 10, 13, 23, 59)));
    }

    #[test]
    fn test_yesterday_end_is_exclusive() {
        let now = local(2024, 10, 14, 15, 30);
        let range = DatePreset::Yesterday.range(now);
        assert_eq!(range.start, local(2024, 10, 13, 0, 0));
        assert!(range.contains(local(2024, 10, 13, 23, 59)));
        assert!(!range.contains(local(2024, 10, 14, 0, 0)));
    }

    #[test]
    fn test_last_seven_days_counts_calendar_days() {
        let now = local(2024, 10, 14, 8, 0);
        let range = DatePreset::Last7Days.range(now);
        assert_eq!(range.start, local(2024, 10, 7, 0, 0));
        assert!(range.contains(local(2024, 10, 7, 0, 0)));
        assert!(!range.contains(local(2024, 10, 6, 23, 59)));
    }

    #[test]
    fn test_phrase_round_trip() {
        for preset in DatePreset::ALL {
            assert_eq!(DatePreset::from_phrase(preset.phrase()), Some(preset));
        }
        assert_eq!(DatePreset::from_phrase("Last 30 Days"), Some(DatePreset::Last30Days));
        assert_eq!(DatePreset::from_phrase("last week"), None);
    }
}
