use std::collections::BTreeSet;

use crate::fuzzy::Session;

pub const DEFAULT_MASK: &str = "[XXX]";

/// Replace every fuzzy occurrence of `needle` in `text` with [`DEFAULT_MASK`].
pub fn redact(text: &str, needle: &str) -> String {
    let matches = Session::new(text, needle).matches();
    redact_with(text, &matches, DEFAULT_MASK)
}

/// Replace each phrase in `matches` with `mask`, longest phrase first so a
/// shorter match never splits a longer one.
pub fn redact_with(text: &str, matches: &BTreeSet<String>, mask: &str) -> String {
    let mut redacted = text.to_string();
    for phrase in longest_first(matches) {
        redacted = redacted.replace(phrase, mask);
    }
    redacted
}

/// Matches ordered by descending length, then lexicographically.
pub fn longest_first(matches: &BTreeSet<String>) -> Vec<&str> {
    let mut ordered: Vec<&str> = matches.iter().map(String::as_str).collect();
    // BTreeSet iteration is already sorted, the stable sort keeps that for ties
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn longest_phrase_is_replaced_first() {
        let matches = set(&["very important", "very important thing"]);
        let out = redact_with("a very important thing and a very important idea", &matches, "#");
        assert_eq!(out, "a # and a # idea");
    }

    #[test]
    fn ordering_is_deterministic() {
        let matches = set(&["bb", "a", "cc", "ddd"]);
        assert_eq!(longest_first(&matches), vec!["ddd", "bb", "cc", "a"]);
    }

    #[test]
    fn no_matches_leaves_text_alone() {
        assert_eq!(redact_with("untouched", &BTreeSet::new(), "#"), "untouched");
        assert_eq!(redact("nothing here to hide", "very important thing"), "nothing here to hide");
    }

    #[test]
    fn redact_masks_typo() {
        let out = redact("Sed verys important thing. Mauris", "very important thing");
        assert_eq!(out, "Sed [XXX]. Mauris");
    }
}
