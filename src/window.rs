/// Split trimmed text on runs of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Every contiguous run of `size` words, joined with single spaces, in
/// order of start index. Runs that would pass the end are skipped.
pub fn word_windows<'a>(words: &'a [String], size: usize) -> impl Iterator<Item = String> + 'a {
    // slice::windows panics on zero
    let size = size.max(1);
    words.windows(size).map(|window| window.join(" "))
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(words("  very \t important\n\nthing "), vec!["very", "important", "thing"]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn windows_slide_by_one_word() {
        let w = words("a b c d");
        let pairs: Vec<String> = word_windows(&w, 2).collect();
        assert_eq!(pairs, vec!["a b", "b c", "c d"]);
    }

    #[test]
    fn windows_longer_than_text_yield_nothing() {
        let w = words("a b");
        assert_eq!(word_windows(&w, 3).count(), 0);
        assert_eq!(word_windows(&[], 1).count(), 0);
    }

    #[test]
    fn word_count_ignores_extra_spaces() {
        assert_eq!(word_count(" Peter  Longman And "), 3);
        assert_eq!(word_count(""), 0);
    }
}
