//! Fuzzy phrase location: find the spots in a body of text where a short
//! reference phrase occurs, tolerating typos, punctuation, possessives and
//! stray common words at the edges.

use std::collections::BTreeSet;

pub mod errors;
pub mod fuzzy;
pub mod metric;
pub mod normalize;
pub mod redact;
pub mod window;

pub use errors::{Error, Result};
pub use fuzzy::{SIMILARITY_THRESHOLD, Session};
pub use metric::{DynMetric, FnMetric, JaroWinkler, Metric, MetricKind};
pub use normalize::{COMMON_WORDS, chomp_common_words, similarity_form, strip_decorators};
pub use redact::{DEFAULT_MASK, redact, redact_with};

/// One-shot [`Session::matches`] with the default metric.
pub fn find_matches(haystack: &str, needle: &str) -> BTreeSet<String> {
    Session::new(haystack, needle).matches()
}
