//! Quality Scorer — grades a listing's sections and rolls them up into a
//! `ValidationReport`.
//!
//! Flow per call:
//! 1. Resolve section names (aliases accepted, unknown names diagnosed)
//! 2. Run each section's rubric, or record it as missing
//! 3. Pool metrics across sections into emotion / conversion / trust
//! 4. Weight dimensions into the overall score, grade it, order the issues

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::diagnostics::Diagnostic;
use crate::locale::Locale;
use crate::quality::content::{ContentSection, SectionKind};
use crate::quality::dimensions::{DimensionScores, ListingSignals};
use crate::quality::extractor::TextMetricExtractor;
use crate::quality::issues::{build_action_items, sort_issues, Issue, Severity};
use crate::quality::sections::{missing, SectionRubric, SectionScore};
use crate::quality::terms::TermLists;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub overall_score: f64,
    pub grade: String,
    pub emotion_score: f64,
    pub conversion_score: f64,
    pub trust_score: f64,
    pub content_score: f64,
    pub section_scores: Vec<SectionScore>,
    pub issues: Vec<Issue>,
    pub action_items: Vec<String>,
    pub summary: String,
    pub diagnostics: Vec<Diagnostic>,
    pub locale: Locale,
}

impl ValidationReport {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionScore> {
        self.section_scores.iter().find(|s| s.section == kind)
    }
}

/// Scores listings for one locale. Cheap to clone; holds only the shared config.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    config: Arc<EngineConfig>,
    locale: Locale,
}

impl QualityScorer {
    /// Scorer for the configuration's default locale.
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let locale = config.default_locale.clone();
        Self::for_locale(config, locale)
    }

    pub fn for_locale(config: Arc<EngineConfig>, locale: Locale) -> Self {
        if config.terms_for(&locale).is_none() {
            warn!("No term lists for locale '{locale}'; scoring with empty lists");
        }
        Self { config, locale }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Scores a name → text map, e.g. a generator's output fields.
    pub fn score_map(&self, sections: &BTreeMap<String, String>) -> ValidationReport {
        let sections: Vec<ContentSection> = sections
            .iter()
            .map(|(name, text)| ContentSection::new(name.as_str(), text.as_str()))
            .collect();
        self.score(&sections)
    }

    pub fn score(&self, sections: &[ContentSection]) -> ValidationReport {
        let scoring = &self.config.scoring;
        let mut diagnostics = Vec::new();

        let empty = TermLists::new();
        let terms = match self.config.terms_for(&self.locale) {
            Some(terms) => terms,
            None => {
                diagnostics.push(Diagnostic::configuration_missing(format!(
                    "No term lists for locale '{}'; lexical signals not scored",
                    self.locale
                )));
                &empty
            }
        };

        let grouped = group_sections(sections, &mut diagnostics);

        let rubric = SectionRubric::new(
            TextMetricExtractor::new(terms, &self.locale),
            scoring.issue_threshold,
        );
        let mut section_scores = Vec::with_capacity(SectionKind::SCORED.len());
        let mut issues = Vec::new();
        let mut signals = ListingSignals::default();
        let mut scored_any = false;

        for kind in SectionKind::SCORED {
            match grouped.get(&kind).filter(|t| !t.trim().is_empty()) {
                Some(text) => {
                    let outcome = rubric.score(kind, text);
                    signals.absorb(&outcome.metrics, outcome.faq_pairs);
                    section_scores.push(outcome.score);
                    issues.extend(outcome.issues);
                    scored_any = true;
                }
                None => {
                    let (score, issue) = missing(kind);
                    section_scores.push(score);
                    issues.push(issue);
                }
            }
        }

        let dims = DimensionScores::compute(&signals, &section_scores);
        if scored_any {
            issues.extend(dimension_issues(&dims, scoring.issue_threshold));
        }
        sort_issues(&mut issues);

        let overall_score = dims.overall(&scoring.weights);
        let grade = self.config.grade_for(overall_score).to_string();
        let action_items = build_action_items(&issues, &section_scores, scoring.max_action_items);

        debug!(
            "Scored listing ({}): overall {overall_score} grade {grade}, {} issues",
            self.locale,
            issues.len()
        );

        ValidationReport {
            overall_score,
            grade,
            emotion_score: dims.emotion,
            conversion_score: dims.conversion,
            trust_score: dims.trust,
            content_score: dims.content,
            section_scores,
            issues,
            action_items,
            summary: summarize(overall_score, &dims),
            diagnostics,
            locale: self.locale.clone(),
        }
    }
}

/// Resolves section names. Repeated sections are joined with a newline.
fn group_sections(
    sections: &[ContentSection],
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<SectionKind, String> {
    let mut grouped: BTreeMap<SectionKind, String> = BTreeMap::new();
    for section in sections {
        let Some(kind) = SectionKind::from_name(&section.name) else {
            debug!("Ignoring unknown section '{}'", section.name);
            diagnostics.push(Diagnostic::unknown_section(&section.name));
            continue;
        };
        grouped
            .entry(kind)
            .and_modify(|text| {
                text.push('\n');
                text.push_str(&section.raw_text);
            })
            .or_insert_with(|| section.raw_text.clone());
    }
    grouped
}

fn dimension_issues(dims: &DimensionScores, threshold: f64) -> Vec<Issue> {
    let floor = threshold * 10.0;
    let checks = [
        (
            dims.emotion,
            "Listing lacks emotional intensity",
            "Add power words and transformation language to the title and bullet labels",
        ),
        (
            dims.conversion,
            "Listing lacks a conversion structure",
            "Lead with the customer's problem, present the product as the solution, and close with a call-to-action and risk reversal",
        ),
        (
            dims.trust,
            "Listing carries few trust signals",
            "Mention certifications, warranty or guarantee terms, and specific customer numbers",
        ),
    ];
    checks
        .into_iter()
        .filter(|(score, _, _)| *score < floor)
        .map(|(score, message, suggestion)| {
            Issue::new(Severity::Major, SectionKind::Listing, message, suggestion)
                .with_impact(10.0 - score)
        })
        .collect()
}

fn summarize(overall: f64, dims: &DimensionScores) -> String {
    let (emotion, conversion, trust) = (dims.emotion, dims.conversion, dims.trust);
    if overall >= 9.0 {
        format!(
            "Exceptional listing quality. The copy is emotionally engaging (emotion: {emotion}/10), \
             conversion-optimized (conversion: {conversion}/10) and trust-building (trust: {trust}/10)."
        )
    } else if overall >= 7.0 {
        format!(
            "Strong listing with good emotional appeal (emotion: {emotion}/10) and conversion elements \
             (conversion: {conversion}/10). Work through the action items to reach top quality."
        )
    } else if overall >= 5.0 {
        format!(
            "Decent foundation, but significant improvements are needed. Emotion: {emotion}/10, \
             conversion: {conversion}/10, trust: {trust}/10. Address the major issues first."
        )
    } else {
        format!(
            "This listing needs major improvements. Low scores across emotion ({emotion}/10), \
             conversion ({conversion}/10) and trust ({trust}/10) point to fundamental gaps."
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
