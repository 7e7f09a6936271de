use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, trace};

use crate::errors::{Error, Result};
use crate::metric::{DynMetric, JaroWinkler, Metric, MetricKind};
use crate::normalize::{similarity_form, strip_decorators};
use crate::window::{tokenize, word_count, word_windows};

/// A phrase must score strictly above this to count as a fuzzy occurrence.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

// Forward windows run up to this many words past the needle's word count.
const FORWARD_EXTRA_WORDS: usize = 2;
// Reverse windows stop this many words short of the needle's word count.
const REVERSE_SHORTFALL: usize = 2;
const REVERSE_MIN_WORDS: usize = 2;
const REVERSE_MIN_CHARS: usize = 2;

/// One haystack/needle pair and the scores computed against it.
///
/// The score cache lives and dies with the session. It is keyed by the raw
/// phrase, so each distinct phrase is normalized and scored once.
pub struct Session<M: Metric = JaroWinkler> {
    words: Vec<String>,
    needle: String,
    needle_form: String,
    metric: M,
    scores: HashMap<String, f64>,
}

impl Session<JaroWinkler> {
    pub fn new(haystack: &str, needle: &str) -> Self {
        Session::with_metric(haystack, needle, JaroWinkler)
    }

    /// Like [`Session::new`] but rejects a needle with nothing to match.
    pub fn try_new(haystack: &str, needle: &str) -> Result<Self> {
        let session = Session::new(haystack, needle);
        if session.is_degenerate() {
            return Err(Error::InvalidInput(format!(
                "needle {needle:?} has no comparable characters"
            )));
        }
        Ok(session)
    }
}

impl Session<DynMetric> {
    /// Build a session around a metric picked by name, e.g. `"jaro-winkler"`.
    pub fn with_metric_name(haystack: &str, needle: &str, metric: &str) -> Result<Self> {
        let kind: MetricKind = metric.parse()?;
        Ok(Session::with_metric(haystack, needle, kind.build()))
    }
}

impl<M: Metric> Session<M> {
    pub fn with_metric(haystack: &str, needle: &str, metric: M) -> Self {
        let needle = needle.trim().to_string();
        let needle_form = similarity_form(&needle);

        Self {
            words: tokenize(haystack),
            needle,
            needle_form,
            metric,
            scores: HashMap::new(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    fn needle_words(&self) -> usize {
        word_count(&self.needle)
    }

    // An empty needle, or one made only of separators, matches nothing.
    fn is_degenerate(&self) -> bool {
        self.needle_form.is_empty()
    }

    /// Every distinct phrase of the haystack judged to be a fuzzy occurrence
    /// of the needle, plus verbatim needle fragments found by reverse search.
    /// A needle with no characters left after normalization (empty, or only
    /// separators such as `"- - -"`) yields an empty set, reverse search included.
    pub fn matches(&mut self) -> BTreeSet<String> {
        if self.is_degenerate() {
            debug!(needle = %self.needle, "degenerate needle, nothing to match");
            return BTreeSet::new();
        }

        let mut found = self.fuzzy_matches();
        let fuzzy_count = found.len();
        found.extend(self.reverse_search());

        debug!(
            needle = %self.needle,
            fuzzy = fuzzy_count,
            total = found.len(),
            cached_scores = self.scores.len(),
            "matching finished"
        );
        found
    }

    /// The similarity-threshold half of [`Session::matches`]: candidates
    /// refined to their best subphrase and re-checked against the threshold.
    pub fn fuzzy_matches(&mut self) -> BTreeSet<String> {
        if self.is_degenerate() {
            return BTreeSet::new();
        }

        let refined: BTreeSet<String> = self
            .fuzzy_candidates()
            .into_iter()
            .map(|candidate| strip_decorators(&self.best_subphrase(&candidate)))
            .filter(|phrase| !phrase.is_empty())
            .collect();

        refined
            .into_iter()
            .filter(|phrase| self.similarity_of(phrase) > SIMILARITY_THRESHOLD)
            .collect()
    }

    /// Decorator-stripped word windows scoring above the threshold, best
    /// first. Windows run from one word up to `needle words + 2`; ties keep
    /// the order they were first seen in.
    pub fn fuzzy_candidates(&mut self) -> Vec<String> {
        if self.is_degenerate() {
            return Vec::new();
        }

        let max_size = self.needle_words() + FORWARD_EXTRA_WORDS;
        let windows: Vec<String> = (1..=max_size)
            .flat_map(|size| word_windows(&self.words, size))
            .map(|window| strip_decorators(&window))
            .collect();

        let mut seen = HashSet::new();
        let mut kept: Vec<(String, f64)> = Vec::new();
        for phrase in windows {
            if !seen.insert(phrase.clone()) {
                continue;
            }
            let score = self.similarity_of(&phrase);
            if score > SIMILARITY_THRESHOLD {
                kept.push((phrase, score));
            }
        }

        // stable, so equal scores stay in first-seen order
        kept.sort_by(|a, b| b.1.total_cmp(&a.1));
        debug!(candidates = kept.len(), max_size, "fuzzy candidates collected");
        kept.into_iter().map(|(phrase, _)| phrase).collect()
    }

    /// Trim words off either end of `phrase` while doing so brings it closer
    /// to the needle.
    ///
    /// A phrase is kept when it beats both one-word-shorter variants. Failing
    /// that, the left-chopped variant is taken if it beats the phrase, and
    /// otherwise the right-chopped one, whether or not it scores higher.
    pub fn best_subphrase(&mut self, phrase: &str) -> String {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.len() <= 1 {
            return phrase.to_string();
        }

        let chop_left = strip_decorators(&words[1..].join(" "));
        let chop_right = strip_decorators(&words[..words.len() - 1].join(" "));

        let whole = self.similarity_of(phrase);
        let left = self.similarity_of(&chop_left);
        let right = self.similarity_of(&chop_right);
        trace!(phrase, whole, left, right, "refining");

        if whole > left && whole > right {
            phrase.to_string()
        } else if left > whole {
            self.best_subphrase(&chop_left)
        } else {
            self.best_subphrase(&chop_right)
        }
    }

    /// Haystack windows quoted verbatim (case-sensitive) inside the needle.
    ///
    /// Short fragments rarely clear the similarity threshold against the
    /// whole needle, so they are recovered here. Window sizes run from 2 to
    /// `needle words - 2`; needles of three words or fewer produce nothing.
    pub fn reverse_search(&self) -> Vec<String> {
        let max_size = self.needle_words().saturating_sub(REVERSE_SHORTFALL);

        let mut seen = HashSet::new();
        let mut found: Vec<String> = Vec::new();
        for size in REVERSE_MIN_WORDS..=max_size {
            for phrase in word_windows(&self.words, size) {
                if self.needle.contains(phrase.as_str()) && seen.insert(phrase.clone()) {
                    found.push(phrase);
                }
            }
        }
        found.retain(|phrase| phrase.chars().count() >= REVERSE_MIN_CHARS);
        found.sort_by(|a, b| b.len().cmp(&a.len()));

        debug!(hits = found.len(), max_size, "reverse search finished");
        found
    }

    /// Score of `phrase` against the needle, memoized per raw phrase.
    pub fn similarity_of(&mut self, phrase: &str) -> f64 {
        if let Some(score) = self.scores.get(phrase) {
            return *score;
        }

        let score = self.metric.similarity(&similarity_form(phrase), &self.needle_form);
        trace!(phrase, score, "scored");
        self.scores.insert(phrase.to_string(), score);
        score
    }
}
