use chrono::{DateTime, Local};

/// Truncate string to a max length, adding an ellipsis when truncated.
pub fn truncate_with_ellipsis(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if s.chars().count() <= max_len {
        return s.to_string();
    }

    if max_len <= 3 {
        return ".".repeat(max_len);
    }

    let take = max_len - 3;
    let mut truncated: String = s.chars().take(take).collect();
    truncated.push_str("...");
    truncated
}

/// "Mon Oct 14, 09:30"
pub fn format_timestamp(ts: DateTime<Local>) -> String {
    ts.format("%a %b %d, %H:%M").to_string()
}

/// Tags as "@a @b"
pub fn format_tags<'a, I: IntoIterator<Item = &'a String>>(tags: I) -> String {
    tags.into_iter()
        .map(|t| format!("@{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
        assert_eq!(truncate_with_ellipsis("hello", 2), "..");
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Local.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(ts), "Mon Oct 14, 09:30");
    }

    #[test]
    fn test_format_tags() {
        let tags: BTreeSet<String> = ["work".to_string(), "client".to_string()].into();
        assert_eq!(format_tags(&tags), "@client @work");
    }
}
