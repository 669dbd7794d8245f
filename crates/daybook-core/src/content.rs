//! Text extraction for journal entries: title/body split, `@tags`, `!todo` lines.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::TASK_MARKER;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_-]+)").expect("valid tag regex"));

/// First line (trimmed) is the title, the rest (trimmed as a block) is the body.
pub fn split_title_body(text: &str) -> (String, String) {
    match text.split_once('\n') {
        Some((first, rest)) => (first.trim().to_string(), rest.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

/// Every `@word` in the text, lowercased and deduplicated.
pub fn extract_tags(text: &str) -> BTreeSet<String> {
    TAG_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Titles of lines that start with the task marker followed by whitespace.
///
/// Only whole lines count; a marker in the middle of a sentence is ignored.
pub fn extract_task_titles(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix(TASK_MARKER)?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let title = rest.trim();
            (!title.is_empty()).then(|| title.to_string())
        })
        .collect()
}

/// Lowercase a tag and drop one leading "@".
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    tag.strip_prefix('@').unwrap_or(tag).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title_body() {
        assert_eq!(
            split_title_body("  Title  \n\n body line\nsecond \n"),
            ("Title".to_string(), "body line\nsecond".to_string())
        );
        assert_eq!(split_title_body("Only"), ("Only".to_string(), String::new()));
        assert_eq!(split_title_body(""), (String::new(), String::new()));
    }

    #[test]
    fn test_extract_tags_lowercases_and_dedupes() {
        let tags = extract_tags("Met @Client about @work-stuff, then @client again. a@b_c");
        let tags: Vec<_> = tags.into_iter().collect();
        assert_eq!(tags, vec!["b_c", "client", "work-stuff"]);
    }

    #[test]
    fn test_extract_tags_ignores_bare_at() {
        assert!(extract_tags("email me @ noon").is_empty());
    }

    #[test]
    fn test_extract_task_titles() {
        let text = "Plan\n!todo write report @work\n  !todo\tcall mom\nI said !todo later\n!todonot a task\n!todo   \n";
        assert_eq!(
            extract_task_titles(text),
            vec!["write report @work".to_string(), "call mom".to_string()]
        );
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("@Work"), "work");
        assert_eq!(normalize_tag("client"), "client");
        assert_eq!(normalize_tag(" @X "), "x");
    }
}
