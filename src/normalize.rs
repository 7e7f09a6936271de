use once_cell::sync::Lazy;
use regex::Regex;

/// Words that never belong to a needle but often ride along at a phrase edge.
/// Order matters: each word is tried once, in this order, against the
/// progressively shortened phrase.
pub const COMMON_WORDS: [&str; 8] = ["is", "are", "was", "were", "have", "been", "the", "a"];

static SIMILARITY_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,.\-!?]+").expect("similarity noise pattern is valid"));

static LEADING_DECORATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[!?.,’'\-]+").expect("leading decorator pattern is valid"));

// Trailing punctuation or a possessive marker, repeated greedily up to the end.
static TRAILING_DECORATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[!?.,’'\-]|'s|’s)+$").expect("trailing decorator pattern is valid")
});

/// Lowercase and drop whitespace and the punctuation class `, . - ! ?`.
/// Only used to feed the similarity metric, never returned to callers.
pub fn similarity_form(s: &str) -> String {
    SIMILARITY_NOISE.replace_all(&s.to_lowercase(), "").into_owned()
}

/// Strip edge common words, then leading punctuation and trailing
/// punctuation / possessive `'s`. One pass per end.
pub fn strip_decorators(phrase: &str) -> String {
    let phrase = chomp_common_words(phrase);
    let phrase = LEADING_DECORATORS.replace(&phrase, "");
    TRAILING_DECORATORS.replace(&phrase, "").into_owned()
}

/// Trim at most one leading and one trailing occurrence of each word in
/// [`COMMON_WORDS`], walking the list once.
pub fn chomp_common_words(phrase: &str) -> String {
    let mut phrase = phrase.to_string();

    for word in COMMON_WORDS {
        let suffix = format!(" {word}");
        if phrase.ends_with(&suffix) {
            let trimmed = phrase.trim();
            phrase = trimmed
                .strip_suffix(suffix.as_str())
                .unwrap_or(trimmed)
                .to_string();
        }

        let prefix = format!("{word} ");
        if let Some(rest) = phrase.strip_prefix(prefix.as_str()) {
            phrase = rest.trim().to_string();
        }
    }

    phrase.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_form_drops_punctuation_and_spaces() {
        assert_eq!(similarity_form("Very, Important-Thing!?"), "veryimportantthing");
        assert_eq!(similarity_form("  a . b  "), "ab");
    }

    #[test]
    fn similarity_form_keeps_apostrophes() {
        // apostrophes are not part of the noise class
        assert_eq!(similarity_form("Texas's"), "texas's");
    }

    #[test]
    fn chomp_strips_leading_and_trailing_common_words() {
        assert_eq!(chomp_common_words("the very important thing"), "very important thing");
        assert_eq!(chomp_common_words("very important thing is"), "very important thing");
        assert_eq!(chomp_common_words("is the thing"), "thing");
    }

    #[test]
    fn chomp_leaves_lone_common_word() {
        assert_eq!(chomp_common_words("the"), "the");
        assert_eq!(chomp_common_words("a"), "a");
    }

    #[test]
    fn chomp_is_case_sensitive() {
        assert_eq!(chomp_common_words("The thing"), "The thing");
    }

    #[test]
    fn chomp_walks_list_once_in_order() {
        // "the" is checked before "a", so the exposed "the" survives
        assert_eq!(chomp_common_words("a the thing"), "the thing");
        // "is" is checked before "the", so the exposed "is" survives
        assert_eq!(chomp_common_words("the is thing"), "is thing");
    }

    #[test]
    fn strip_decorators_removes_punctuation_runs() {
        assert_eq!(strip_decorators("--thing!?"), "thing");
        assert_eq!(strip_decorators("'quoted'"), "quoted");
        assert_eq!(strip_decorators("Texas."), "Texas");
    }

    #[test]
    fn strip_decorators_removes_possessive() {
        assert_eq!(strip_decorators("Company's"), "Company");
        assert_eq!(strip_decorators("Company’s."), "Company");
        assert_eq!(strip_decorators("the thing's"), "thing");
    }

    #[test]
    fn strip_decorators_keeps_inner_punctuation() {
        assert_eq!(strip_decorators("amet, very thing."), "amet, very thing");
    }

    #[test]
    fn strip_decorators_is_idempotent_on_typical_phrases() {
        for phrase in [
            "the very important thing.",
            "Peter Longman's",
            "--very importanty thing, the",
            "sodales very important thing cursus,",
            "'s",
            "",
        ] {
            let once = strip_decorators(phrase);
            assert_eq!(strip_decorators(&once), once, "phrase: {phrase:?}");
        }
    }
}
