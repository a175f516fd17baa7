//! Text Metric Extractor — lexical and structural signals over raw copy.
//!
//! Pure and deterministic. Empty text yields zeroed metrics.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::quality::terms::{TermCategory, TermLists};

static SENTENCE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?–—]\s+").expect("sentence break pattern"));

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern"));

static NUMERIC_SOCIAL_PROOF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\d[\d,.]*\s*[%+]?\s*(?:happy\s+)?(?:customers|users|people|reviews|stars|ratings|buyers|families)",
    )
    .expect("numeric social proof pattern")
});

/// Words at or below this many characters are ignored by the repeat heuristic.
const REPEAT_MIN_WORD_CHARS: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    Flag(bool),
}

/// A single named signal, e.g. `power_words_count = 3` or `has_cta = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

/// All signals extracted from one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub char_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub line_count: usize,
    pub has_digits: bool,
    /// Numbers attached to customers/reviews/stars ("10,000 customers").
    pub numeric_social_proof: usize,
    /// Highest repeat count of any word longer than three characters.
    pub max_word_repeat: usize,
    /// Occurrences per category (every substring hit of every term).
    pub category_counts: BTreeMap<TermCategory, usize>,
    /// Distinct terms that matched, in term-list order.
    pub matched_terms: BTreeMap<TermCategory, Vec<String>>,
}

impl Metrics {
    pub fn count(&self, category: TermCategory) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    pub fn has(&self, category: TermCategory) -> bool {
        self.count(category) > 0
    }

    pub fn distinct(&self, category: TermCategory) -> usize {
        self.matched_terms.get(&category).map_or(0, Vec::len)
    }

    /// Flattens the metrics into named signals for diagnostics output.
    pub fn named(&self) -> Vec<Metric> {
        let mut out = vec![
            Metric::count("char_length", self.char_length),
            Metric::count("word_count", self.word_count),
            Metric::count("sentence_count", self.sentence_count),
            Metric::count("paragraph_count", self.paragraph_count),
            Metric::count("line_count", self.line_count),
            Metric::flag("has_digits", self.has_digits),
            Metric::count("numeric_social_proof", self.numeric_social_proof),
            Metric::count("max_word_repeat", self.max_word_repeat),
        ];
        for category in TermCategory::ALL {
            out.push(Metric::count(
                &format!("{}_count", category.as_str()),
                self.count(category),
            ));
        }
        out.push(Metric::flag("has_cta", self.has(TermCategory::CtaPhrases)));
        out
    }
}

impl Metric {
    fn count(name: &str, value: usize) -> Self {
        Self {
            name: name.to_string(),
            value: MetricValue::Count(value),
        }
    }

    fn flag(name: &str, value: bool) -> Self {
        Self {
            name: name.to_string(),
            value: MetricValue::Flag(value),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// Scans text against a locale's term lists.
///
/// Matching is case-insensitive substring matching: both the text and every
/// term are folded with the locale's case fold before comparison.
#[derive(Debug, Clone, Copy)]
pub struct TextMetricExtractor<'a> {
    terms: &'a TermLists,
    locale: &'a Locale,
}

impl<'a> TextMetricExtractor<'a> {
    pub fn new(terms: &'a TermLists, locale: &'a Locale) -> Self {
        Self { terms, locale }
    }

    pub fn extract(&self, text: &str) -> Metrics {
        if text.trim().is_empty() {
            return Metrics::default();
        }

        let folded = self.locale.fold(text);

        let mut category_counts = BTreeMap::new();
        let mut matched_terms = BTreeMap::new();
        for category in TermCategory::ALL {
            let (count, matched) = self.scan_category(&folded, category);
            if count > 0 {
                category_counts.insert(category, count);
                matched_terms.insert(category, matched);
            }
        }

        Metrics {
            char_length: text.chars().count(),
            word_count: text.split_whitespace().count(),
            sentence_count: count_segments(&SENTENCE_BREAK_RE, text),
            paragraph_count: count_segments(&PARAGRAPH_BREAK_RE, text),
            line_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
            has_digits: text.chars().any(|c| c.is_ascii_digit()),
            numeric_social_proof: NUMERIC_SOCIAL_PROOF_RE.find_iter(&folded).count(),
            max_word_repeat: max_word_repeat(&folded),
            category_counts,
            matched_terms,
        }
    }

    pub fn fold(&self, text: &str) -> String {
        self.locale.fold(text)
    }

    /// Occurrences of `category` terms in `text`, without a full extraction.
    /// Used by the rubrics for per-bullet and per-answer checks.
    pub fn count_in(&self, text: &str, category: TermCategory) -> usize {
        self.scan_category(&self.locale.fold(text), category).0
    }

    fn scan_category(&self, folded: &str, category: TermCategory) -> (usize, Vec<String>) {
        let mut total = 0;
        let mut matched = Vec::new();
        for term in self.terms.terms(category) {
            let needle = self.locale.fold(term.trim());
            if needle.is_empty() {
                continue;
            }
            let hits = folded.matches(needle.as_str()).count();
            if hits > 0 {
                total += hits;
                if !matched.contains(term) {
                    matched.push(term.clone());
                }
            }
        }
        (total, matched)
    }
}

fn count_segments(re: &Regex, text: &str) -> usize {
    re.split(text).filter(|s| !s.trim().is_empty()).count()
}

fn max_word_repeat(folded: &str) -> usize {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in folded.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if word.chars().count() >= REPEAT_MIN_WORD_CHARS {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts.values().copied().max().unwrap_or(0)
}
