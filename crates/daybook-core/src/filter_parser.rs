//! Free-text filter input: "@client last 30 days", "yesterday @work @urgent".

use crate::constants::FILTER_HINT;
use crate::models::DatePreset;

/// Outcome of parsing a filter string.
///
/// Tags keep their "@" and are lowercased. `tags` and `date` are populated even
/// when `errors` is not empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParseResult {
    pub tags: Vec<String>,
    pub date: Option<DatePreset>,
    pub errors: Vec<String>,
}

impl FilterParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Multi-word presets, longest phrase first so matching is deterministic.
const MULTI_WORD_PRESETS: [DatePreset; 5] = [
    DatePreset::Last365Days,
    DatePreset::Last90Days,
    DatePreset::Last60Days,
    DatePreset::Last30Days,
    DatePreset::Last7Days,
];

const SINGLE_WORD_PRESETS: [DatePreset; 2] = [DatePreset::Today, DatePreset::Yesterday];

pub fn parse_filter_input(input: &str) -> FilterParseResult {
    let mut result = FilterParseResult::default();
    let input = input.trim();
    if input.is_empty() {
        return result;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let mut consumed = vec![false; words.len()];

    // Pass 1: tags
    for (i, word) in lowered.iter().enumerate() {
        if word.starts_with('@') {
            if !result.tags.contains(word) {
                result.tags.push(word.clone());
            }
            consumed[i] = true;
        }
    }

    // Pass 2: date phrases, multi-word before single-word
    let input_lower = input.to_lowercase();
    for preset in MULTI_WORD_PRESETS {
        let phrase = preset.phrase();
        if !input_lower.contains(phrase) {
            continue;
        }
        result.date = Some(preset);
        let phrase_words: Vec<&str> = phrase.split(' ').collect();
        if let Some(start) = lowered
            .windows(phrase_words.len())
            .position(|window| window.iter().zip(&phrase_words).all(|(w, p)| w == p))
        {
            for flag in &mut consumed[start..start + phrase_words.len()] {
                *flag = true;
            }
        }
        break;
    }

    if result.date.is_none() {
        if let Some((i, preset)) = lowered.iter().enumerate().find_map(|(i, word)| {
            DatePreset::from_phrase(word)
                .filter(|p| SINGLE_WORD_PRESETS.contains(p))
                .map(|p| (i, p))
        }) {
            result.date = Some(preset);
            consumed[i] = true;
        }
    }

    // Pass 3: anything left over is an error
    let unconsumed: Vec<&str> = words
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(word, _)| *word)
        .collect();
    if !unconsumed.is_empty() {
        result
            .errors
            .push(format!("Unrecognized: {}", unconsumed.join(" ")));
    }

    result
}

pub fn filter_hint() -> &'static str {
    FILTER_HINT
}

/// Date phrases offered for autocomplete, in menu order
pub fn date_suggestions() -> Vec<&'static str> {
    DatePreset::ALL.iter().map(|p| p.phrase()).collect()
}

// =============================================================================
// Autocomplete
// =============================================================================

/// Text after the last space, trimmed.
pub fn last_word(input: &str) -> &str {
    match input.rfind(' ') {
        Some(idx) => input[idx + 1..].trim(),
        None => input.trim(),
    }
}

/// Replace the last word with `completion` and append a space for the next token.
pub fn replace_last_word(input: &str, completion: &str) -> String {
    let input = input.trim();
    match input.rfind(' ') {
        Some(idx) => format!("{}{} ", &input[..=idx], completion),
        None => format!("{} ", completion),
    }
}

/// First tag whose name starts with `prefix`, ignoring case and "@". Returned as listed.
pub fn best_tag_match<'a, S: AsRef<str>>(prefix: &str, tags: &'a [S]) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let wanted = prefix.trim_start_matches('@').to_lowercase();
    tags.iter().map(|t| t.as_ref()).find(|tag| {
        tag.trim_start_matches('@')
            .to_lowercase()
            .starts_with(&wanted)
    })
}

pub fn best_date_match(prefix: &str) -> Option<&'static str> {
    if prefix.is_empty() {
        return None;
    }
    let wanted = prefix.to_lowercase();
    DatePreset::ALL
        .iter()
        .map(|p| p.phrase())
        .find(|phrase| phrase.starts_with(&wanted))
}

/// Completion for the word under the cursor: tags for "@" words, dates otherwise.
/// A bare "@" suggests nothing.
pub fn suggest_completion<S: AsRef<str>>(input: &str, tags: &[S]) -> Option<String> {
    let word = last_word(input);
    if word.is_empty() {
        return None;
    }
    if word.starts_with('@') {
        if word.len() == 1 {
            return None;
        }
        best_tag_match(word, tags).map(str::to_string)
    } else {
        best_date_match(word).map(str::to_string)
    }
}

/// Apply the Tab completion to `input`, if there is one.
pub fn autocomplete<S: AsRef<str>>(input: &str, tags: &[S]) -> Option<String> {
    let word = last_word(input);
    if word.is_empty() || word == "@" {
        return None;
    }
    let completion = if word.starts_with('@') {
        best_tag_match(word, tags)?
    } else {
        best_date_match(word)?
    };
    Some(replace_last_word(input, completion))
}

/// Every candidate for the word under the cursor, for the suggestions list.
pub fn matching_completions<S: AsRef<str>>(input: &str, tags: &[S]) -> Vec<String> {
    let word = last_word(input);
    if word.is_empty() {
        return Vec::new();
    }
    if let Some(prefix) = word.strip_prefix('@') {
        if prefix.is_empty() {
            return Vec::new();
        }
        let wanted = prefix.to_lowercase();
        return tags
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| t.trim_start_matches('@').to_lowercase().starts_with(&wanted))
            .map(str::to_string)
            .collect();
    }
    let wanted = word.to_lowercase();
    date_suggestions()
        .into_iter()
        .filter(|phrase| phrase.starts_with(&wanted))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_and_multi_word_date() {
        let result = parse_filter_input("@client last 30 days");
        assert_eq!(result.tags, vec!["@client"]);
        assert_eq!(result.date, Some(DatePreset::Last30Days));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_parse_single_word_date_and_many_tags() {
        let result = parse_filter_input("yesterday @work @urgent");
        assert_eq!(result.tags, vec!["@work", "@urgent"]);
        assert_eq!(result.date, Some(DatePreset::Yesterday));
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_reports_leftovers() {
        let result = parse_filter_input("foo @bar");
        assert_eq!(result.tags, vec!["@bar"]);
        assert_eq!(result.date, None);
        assert_eq!(result.errors, vec!["Unrecognized: foo"]);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_dedupes() {
        let result = parse_filter_input("  @Work LAST 7 DAYS @work ");
        assert_eq!(result.tags, vec!["@work"]);
        assert_eq!(result.date, Some(DatePreset::Last7Days));
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_multi_word_wins_over_single_word() {
        let result = parse_filter_input("today last 365 days");
        assert_eq!(result.date, Some(DatePreset::Last365Days));
        assert_eq!(result.errors, vec!["Unrecognized: today"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_filter_input("   "), FilterParseResult::default());
    }

    #[test]
    fn test_last_word_and_replace() {
        assert_eq!(last_word("@work las"), "las");
        assert_eq!(last_word("@wo"), "@wo");
        assert_eq!(last_word(""), "");
        assert_eq!(replace_last_word("@work las", "last 7 days"), "@work last 7 days ");
        assert_eq!(replace_last_word("@wo", "@work"), "@work ");
    }

    #[test]
    fn test_best_matches() {
        let tags = vec!["@client", "@work", "@Workshop"];
        assert_eq!(best_tag_match("@WO", &tags), Some("@work"));
        assert_eq!(best_tag_match("cl", &tags), Some("@client"));
        assert_eq!(best_tag_match("@zz", &tags), None);
        assert_eq!(best_date_match("ye"), Some("yesterday"));
        assert_eq!(best_date_match("last 3"), Some("last 30 days"));
        assert_eq!(best_date_match("nope"), None);
    }

    #[test]
    fn test_autocomplete() {
        let tags = vec!["@client".to_string()];
        assert_eq!(autocomplete("yesterday @cl", &tags), Some("yesterday @client ".to_string()));
        assert_eq!(autocomplete("@client to", &tags), Some("@client today ".to_string()));
        assert_eq!(autocomplete("@x", &tags), None);
        assert_eq!(autocomplete("today @", &tags), None);
        assert_eq!(suggest_completion("@", &tags), None);
        assert_eq!(suggest_completion("@c", &tags), Some("@client".to_string()));
    }

    #[test]
    fn test_hint_and_suggestions() {
        assert_eq!(filter_hint(), "e.g. @work yesterday, last 30 days @client");
        assert_eq!(date_suggestions().len(), 7);
        assert_eq!(date_suggestions()[0], "today");
    }

    #[test]
    fn test_matching_completions_lists_every_candidate() {
        let tags = vec!["@work".to_string(), "@workout".to_string(), "@home".to_string()];
        assert_eq!(matching_completions("@wo", &tags), vec!["@work", "@workout"]);
        assert_eq!(
            matching_completions("@home la", &tags),
            vec!["last 7 days", "last 30 days", "last 60 days", "last 90 days", "last 365 days"]
        );
        assert!(matching_completions("@", &tags).is_empty());
        assert!(matching_completions("", &tags).is_empty());
    }
}
