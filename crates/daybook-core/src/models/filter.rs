use std::collections::BTreeSet;

use super::DatePreset;
use crate::content::normalize_tag;

/// Tag and date constraints applied to both the entry and todo lists.
///
/// Tags are stored normalized (lowercase, no leading "@").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilter {
    pub tags: BTreeSet<String>,
    pub date: Option<DatePreset>,
}

impl ActiveFilter {
    pub fn new<I, S>(tags: I, date: Option<DatePreset>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| normalize_tag(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
            date,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.tags.is_empty() || self.date.is_some()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        self.date = None;
    }

    /// Tags rendered with their "@" prefix, space separated
    pub fn tags_display(&self) -> String {
        self.tags
            .iter()
            .map(|t| format!("@{}", t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One-line description, e.g. "@work · Last 7 days"
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.tags.is_empty() {
            parts.push(self.tags_display());
        }
        if let Some(date) = self.date {
            parts.push(date.label().to_string());
        }
        if parts.is_empty() {
            "No filter".to_string()
        } else {
            parts.join(" · ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_tags() {
        let filter = ActiveFilter::new(["@Work", "client", "@"], None);
        assert_eq!(
            filter.tags.iter().cloned().collect::<Vec<_>>(),
            vec!["client".to_string(), "work".to_string()]
        );
        assert!(filter.is_active());
    }

    #[test]
    fn test_summary() {
        let mut filter = ActiveFilter::new(["work"], Some(DatePreset::Last7Days));
        assert_eq!(filter.summary(), "@work · Last 7 days");
        filter.clear();
        assert!(!filter.is_active());
        assert_eq!(filter.summary(), "No filter");
    }
}
