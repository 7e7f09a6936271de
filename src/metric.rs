use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// A string similarity score in `[0, 1]`, higher meaning more alike.
///
/// Implementations must be pure and deterministic: a session caches scores
/// and assumes asking twice gives the same answer.
pub trait Metric {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Runtime-selected metric, see [`MetricKind::build`].
pub type DynMetric = Box<dyn Metric + Send + Sync>;

impl Metric for DynMetric {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }
}

/// Adapts a plain function or closure into a [`Metric`].
pub struct FnMetric<F>(pub F);

impl<F> Metric for FnMetric<F>
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (self.0)(a, b)
    }
}

// Below this Jaro score no prefix boost is applied.
const BOOST_THRESHOLD: f64 = 0.7;

/// Jaro-Winkler distance, typo tolerant.
///
/// The prefix boost covers the whole common prefix, weighted by
/// `min(0.1, 1 / longer_len)` so the score stays within `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Metric for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        jaro_winkler(&a, &b)
    }
}

pub fn jaro_winkler(a: &[char], b: &[char]) -> f64 {
    let jaro = jaro(a, b);
    if jaro < BOOST_THRESHOLD {
        return jaro;
    }

    let longer = a.len().max(b.len());
    let prefix = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
    let weight = (1.0 / longer as f64).min(0.1);
    jaro + weight * prefix as f64 * (1.0 - jaro)
}

fn jaro(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Walk the shorter string, claiming the first free match in the longer one.
    let (short, long) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let match_dist = (long.len() / 2).saturating_sub(1);
    let mut short_matches = vec![false; short.len()];
    let mut long_matches = vec![false; long.len()];
    let mut matches = 0usize;

    for (i, ch) in short.iter().enumerate() {
        let start = i.saturating_sub(match_dist);
        let end = (i + match_dist + 1).min(long.len());
        for j in start..end {
            if long_matches[j] || *ch != long[j] {
                continue;
            }
            short_matches[i] = true;
            long_matches[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let short_seq = short
        .iter()
        .zip(&short_matches)
        .filter_map(|(ch, matched)| matched.then_some(ch));
    let long_seq = long
        .iter()
        .zip(&long_matches)
        .filter_map(|(ch, matched)| matched.then_some(ch));
    let transpositions = short_seq.zip(long_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    let t = (transpositions / 2) as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t) / m) / 3.0
}

/// `strsim`'s Jaro-Winkler (classic four-char prefix boost).
#[derive(Debug, Clone, Copy, Default)]
pub struct StrsimJaroWinkler;

impl Metric for StrsimJaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }
}

/// Levenshtein distance normalized by the longer string.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Metric for NormalizedLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Named metrics selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricKind {
    #[default]
    JaroWinkler,
    StrsimJaroWinkler,
    Levenshtein,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::JaroWinkler,
        MetricKind::StrsimJaroWinkler,
        MetricKind::Levenshtein,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::JaroWinkler => "jaro-winkler",
            MetricKind::StrsimJaroWinkler => "strsim-jaro-winkler",
            MetricKind::Levenshtein => "levenshtein",
        }
    }

    pub fn build(self) -> DynMetric {
        match self {
            MetricKind::JaroWinkler => Box::new(JaroWinkler),
            MetricKind::StrsimJaroWinkler => Box::new(StrsimJaroWinkler),
            MetricKind::Levenshtein => Box::new(NormalizedLevenshtein),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::MetricUnavailable(s.to_string()))
    }
}
