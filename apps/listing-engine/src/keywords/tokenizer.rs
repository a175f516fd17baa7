//! Keyword Tokenizer — cleans, folds, de-duplicates and expands a candidate
//! keyword pool into byte-measured tokens.
//!
//! A candidate holding several terms ("knife, board") is split on commas,
//! semicolons and the configured separator. Punctuation other than hyphens is
//! stripped, so no token can smuggle a separator into the rendered field.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::keywords::lexicon::KeywordLexicon;
use crate::keywords::rules::MorphologyRules;
use crate::locale::Locale;

/// Anything that is not a word character, whitespace or a hyphen.
static KEYWORD_NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("keyword noise pattern"));

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Business value of a keyword, used as the packer's first priority key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    /// Competitor and material terms that capture comparison shoppers.
    Conquest,
    /// The listing's own search terms.
    #[default]
    Primary,
    Seasonal,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCandidate {
    pub text: String,
    #[serde(default)]
    pub category: KeywordCategory,
}

impl KeywordCandidate {
    pub fn new(text: impl Into<String>, category: KeywordCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

impl From<&str> for KeywordCandidate {
    fn from(text: &str) -> Self {
        Self::new(text, KeywordCategory::Primary)
    }
}

/// A normalized keyword ready for packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordToken {
    pub text: String,
    /// Length of the UTF-8 encoding.
    pub byte_length: usize,
    /// Text of the base token this one was expanded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<String>,
    pub category: KeywordCategory,
    /// Position of the originating candidate in the input pool.
    pub source_index: usize,
    /// Came from the locale's supplemental pool rather than the caller.
    #[serde(default)]
    pub supplemental: bool,
}

impl KeywordToken {
    pub fn new(text: impl Into<String>, category: KeywordCategory, source_index: usize) -> Self {
        let text = text.into();
        Self {
            byte_length: text.len(),
            text,
            variant_of: None,
            category,
            source_index,
            supplemental: false,
        }
    }

    fn variant(text: String, base: &KeywordToken) -> Self {
        Self {
            variant_of: Some(base.text.clone()),
            supplemental: base.supplemental,
            ..Self::new(text, base.category, base.source_index)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedKeywords {
    pub tokens: Vec<KeywordToken>,
    pub diagnostics: Vec<Diagnostic>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ────────────────────────────────────────────────────────────────────────────

pub struct KeywordTokenizer<'a> {
    config: &'a EngineConfig,
}

impl<'a> KeywordTokenizer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Base tokens in input order, each followed by its variants.
    ///
    /// The first occurrence of a folded text wins; later duplicates, whether
    /// bases or variants, are dropped silently.
    pub fn normalize(&self, candidates: &[KeywordCandidate], locale: &Locale) -> NormalizedKeywords {
        self.normalize_with(candidates, &[], locale)
    }

    /// Like `normalize`, then appends `supplemental` candidates flagged so the
    /// packer ranks them after every caller token. Caller texts win duplicates.
    ///
    /// `Primary` candidates are re-categorized by the locale's lexicon cues.
    pub fn normalize_with(
        &self,
        candidates: &[KeywordCandidate],
        supplemental: &[KeywordCandidate],
        locale: &Locale,
    ) -> NormalizedKeywords {
        let keywords = &self.config.keywords;
        let rules: Option<&MorphologyRules> = self.config.morphology_for(locale);
        if rules.is_none() {
            debug!("No morphology ruleset for locale '{locale}'; expansion skipped");
        }
        let lexicon: Option<&KeywordLexicon> = self.config.lexicon_for(locale);

        let mut out = NormalizedKeywords::default();
        let mut seen: HashSet<String> = HashSet::new();

        let pool = candidates
            .iter()
            .map(|c| (c, false))
            .chain(supplemental.iter().map(|c| (c, true)));

        for (index, (candidate, is_supplemental)) in pool.enumerate() {
            let pieces: Vec<String> = split_terms(&candidate.text, &keywords.separator)
                .into_iter()
                .map(clean_term)
                .filter(|p| !p.is_empty())
                .collect();
            if pieces.is_empty() {
                out.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidInput,
                    format!("Keyword candidate at position {index} is empty and was dropped"),
                ));
                continue;
            }

            for cleaned in pieces {
                if cleaned.chars().count() < keywords.min_chars {
                    out.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::InvalidInput,
                        format!(
                            "Keyword candidate '{cleaned}' is shorter than {} characters and was dropped",
                            keywords.min_chars
                        ),
                    ));
                    continue;
                }

                let folded = locale.fold(&cleaned);
                if !seen.insert(folded.clone()) {
                    continue;
                }
                let category = match (candidate.category, lexicon) {
                    (KeywordCategory::Primary, Some(lexicon)) => lexicon.classify(&folded, locale),
                    (category, _) => category,
                };
                let mut base = KeywordToken::new(folded, category, index);
                base.supplemental = is_supplemental;

                let variants = rules
                    .map(|r| r.expand(&base.text, keywords.max_variants))
                    .unwrap_or_default();
                out.tokens.push(base.clone());
                for variant in variants {
                    if seen.insert(variant.clone()) {
                        out.tokens.push(KeywordToken::variant(variant, &base));
                    }
                }
            }
        }

        debug!(
            "Normalized {} candidates ({} supplemental) into {} tokens for locale '{locale}'",
            candidates.len() + supplemental.len(),
            supplemental.len(),
            out.tokens.len()
        );
        out
    }
}

/// Splits on commas, semicolons and the trimmed separator.
fn split_terms<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    let separator = separator.trim();
    text.split([',', ';'])
        .flat_map(|part| {
            if separator.is_empty() {
                vec![part]
            } else {
                part.split(separator).collect()
            }
        })
        .collect()
}

/// Strips punctuation (hyphens survive) and collapses whitespace.
fn clean_term(text: &str) -> String {
    KEYWORD_NOISE_RE
        .replace_all(text, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
