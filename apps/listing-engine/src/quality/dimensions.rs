//! Listing-wide dimension scores (emotion, conversion, trust, content) and
//! their weighted combination into the overall score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quality::extractor::Metrics;
use crate::quality::sections::{capped, round1, SectionScore};
use crate::quality::terms::TermCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub emotion: f64,
    pub conversion: f64,
    pub trust: f64,
    pub content: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            emotion: 0.25,
            conversion: 0.30,
            trust: 0.20,
            content: 0.25,
        }
    }
}

impl DimensionWeights {
    pub fn total(&self) -> f64 {
        self.emotion + self.conversion + self.trust + self.content
    }
}

/// Signals pooled over every recognised section.
#[derive(Debug, Clone, Default)]
pub struct ListingSignals {
    counts: BTreeMap<TermCategory, usize>,
    numeric_social_proof: usize,
    faq_pairs: usize,
}

impl ListingSignals {
    pub fn absorb(&mut self, metrics: &Metrics, faq_pairs: usize) {
        for (category, count) in &metrics.category_counts {
            *self.counts.entry(*category).or_insert(0) += count;
        }
        self.numeric_social_proof += metrics.numeric_social_proof;
        self.faq_pairs += faq_pairs;
    }

    fn count(&self, category: TermCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    fn has(&self, category: TermCategory) -> bool {
        self.count(category) > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub emotion: f64,
    pub conversion: f64,
    pub trust: f64,
    pub content: f64,
}

impl DimensionScores {
    pub fn compute(signals: &ListingSignals, sections: &[SectionScore]) -> Self {
        Self {
            emotion: emotion_score(signals),
            conversion: conversion_score(signals),
            trust: trust_score(signals),
            content: content_score(sections),
        }
    }

    /// Weighted mean, clamped to [0, 10] and rounded to one decimal.
    pub fn overall(&self, weights: &DimensionWeights) -> f64 {
        let total = weights.total();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted = weights.emotion * self.emotion
            + weights.conversion * self.conversion
            + weights.trust * self.trust
            + weights.content * self.content;
        round1((weighted / total).clamp(0.0, 10.0))
    }
}

fn dimension(raw: f64) -> f64 {
    round1(raw.clamp(0.0, 10.0))
}

pub fn emotion_score(s: &ListingSignals) -> f64 {
    dimension(
        capped(s.count(TermCategory::PowerWords), 1.0, 4.0)
            + capped(s.count(TermCategory::SupportingWords), 0.5, 2.0)
            + capped(s.count(TermCategory::UrgencyWords), 0.5, 1.5)
            + capped(s.count(TermCategory::TransformationPhrases), 1.0, 2.5),
    )
}

pub fn conversion_score(s: &ListingSignals) -> f64 {
    let structure =
        s.has(TermCategory::ProblemPhrases) && s.has(TermCategory::SolutionPhrases);
    dimension(
        capped(usize::from(structure), 3.5, 3.5)
            + capped(usize::from(s.has(TermCategory::AgitationPhrases)), 0.5, 0.5)
            + capped(s.count(TermCategory::CtaPhrases), 2.0, 2.0)
            + capped(s.count(TermCategory::SocialProof), 0.75, 1.25)
            + capped(s.count(TermCategory::GuaranteePhrases), 1.0, 1.25)
            + capped(s.count(TermCategory::UrgencyWords), 0.5, 0.75)
            + capped(s.count(TermCategory::BenefitPhrases), 0.5, 0.75),
    )
}

pub fn trust_score(s: &ListingSignals) -> f64 {
    let assurances =
        s.count(TermCategory::TrustWords) + s.count(TermCategory::GuaranteePhrases);
    dimension(
        capped(assurances, 3.0, 6.0)
            + capped(s.numeric_social_proof, 1.25, 2.5)
            + capped(usize::from(s.faq_pairs >= 2), 1.5, 1.5),
    )
}

pub fn content_score(sections: &[SectionScore]) -> f64 {
    let max: f64 = sections.iter().map(|s| s.max_score).sum();
    if max <= 0.0 {
        return 0.0;
    }
    let earned: f64 = sections.iter().map(|s| s.score).sum();
    dimension(earned / max * 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::content::SectionKind;
    use proptest::prelude::*;

    fn signals(pairs: &[(TermCategory, usize)]) -> ListingSignals {
        let mut metrics = Metrics::default();
        for (category, count) in pairs {
            metrics.category_counts.insert(*category, *count);
        }
        let mut s = ListingSignals::default();
        s.absorb(&metrics, 0);
        s
    }

    #[test]
    fn test_empty_signals_score_zero() {
        let s = ListingSignals::default();
        let d = DimensionScores::compute(&s, &[]);
        assert_eq!(d, DimensionScores { emotion: 0.0, conversion: 0.0, trust: 0.0, content: 0.0 });
        assert_eq!(d.overall(&DimensionWeights::default()), 0.0);
    }

    #[test]
    fn test_emotion_caps_power_words() {
        let few = emotion_score(&signals(&[(TermCategory::PowerWords, 4)]));
        let many = emotion_score(&signals(&[(TermCategory::PowerWords, 400)]));
        assert_eq!(few, 4.0);
        assert_eq!(many, 4.0, "power words cap at 4");
    }

    #[test]
    fn test_conversion_structure_needs_problem_and_solution() {
        let half = conversion_score(&signals(&[(TermCategory::ProblemPhrases, 1)]));
        let full = conversion_score(&signals(&[
            (TermCategory::ProblemPhrases, 1),
            (TermCategory::SolutionPhrases, 1),
        ]));
        assert_eq!(half, 0.0);
        assert_eq!(full, 3.5);
    }

    #[test]
    fn test_structure_plus_one_cta_clears_half() {
        let s = signals(&[
            (TermCategory::ProblemPhrases, 1),
            (TermCategory::SolutionPhrases, 1),
            (TermCategory::CtaPhrases, 1),
        ]);
        assert_eq!(conversion_score(&s), 5.5);
    }

    #[test]
    fn test_trust_counts_guarantees_and_faqs() {
        let mut s = signals(&[(TermCategory::TrustWords, 1), (TermCategory::GuaranteePhrases, 1)]);
        assert_eq!(trust_score(&s), 6.0);
        s.absorb(&Metrics::default(), 2);
        assert_eq!(trust_score(&s), 7.5);
    }

    #[test]
    fn test_maximal_signals_stay_within_ten() {
        let all: Vec<(TermCategory, usize)> =
            TermCategory::ALL.iter().map(|c| (*c, 1000)).collect();
        let mut s = signals(&all);
        s.absorb(
            &Metrics {
                numeric_social_proof: 50,
                ..Metrics::default()
            },
            10,
        );
        for score in [emotion_score(&s), conversion_score(&s), trust_score(&s)] {
            assert!((0.0..=10.0).contains(&score), "out of range: {score}");
        }
    }

    #[test]
    fn test_content_score_is_ratio_of_section_totals() {
        let section = |kind, score, max| SectionScore {
            section: kind,
            score,
            max_score: max,
            percentage: 0.0,
            feedback: String::new(),
            strengths: vec![],
            improvements: vec![],
        };
        let sections = vec![
            section(SectionKind::Title, 10.0, 20.0),
            section(SectionKind::Bullets, 25.0, 25.0),
            section(SectionKind::Description, 0.0, 25.0),
            section(SectionKind::Faqs, 7.5, 15.0),
        ];
        // 42.5 / 85 * 10 = 5.0
        assert_eq!(content_score(&sections), 5.0);
    }

    #[test]
    fn test_overall_is_weighted_mean() {
        let d = DimensionScores {
            emotion: 8.0,
            conversion: 6.0,
            trust: 4.0,
            content: 10.0,
        };
        // 0.25*8 + 0.30*6 + 0.20*4 + 0.25*10 = 2 + 1.8 + 0.8 + 2.5 = 7.1
        assert_eq!(d.overall(&DimensionWeights::default()), 7.1);
    }

    #[test]
    fn test_zero_weights_yield_zero() {
        let d = DimensionScores {
            emotion: 8.0,
            conversion: 6.0,
            trust: 4.0,
            content: 10.0,
        };
        let w = DimensionWeights {
            emotion: 0.0,
            conversion: 0.0,
            trust: 0.0,
            content: 0.0,
        };
        assert_eq!(d.overall(&w), 0.0);
    }

    fn pooled(counts: &[usize], numeric: usize, faq_pairs: usize) -> ListingSignals {
        let mut metrics = Metrics {
            numeric_social_proof: numeric,
            ..Metrics::default()
        };
        for (category, count) in TermCategory::ALL.iter().zip(counts) {
            metrics.category_counts.insert(*category, *count);
        }
        let mut s = ListingSignals::default();
        s.absorb(&metrics, faq_pairs);
        s
    }

    fn all_dimensions(s: &ListingSignals) -> [f64; 3] {
        [emotion_score(s), conversion_score(s), trust_score(s)]
    }

    proptest! {
        #[test]
        fn prop_more_of_any_category_never_lowers_a_dimension(
            base in prop::collection::vec(0usize..6, TermCategory::ALL.len()),
            category in 0..TermCategory::ALL.len(),
            extra in 1usize..25,
        ) {
            let mut more = base.clone();
            more[category] += extra;
            let before = all_dimensions(&pooled(&base, 0, 0));
            let after = all_dimensions(&pooled(&more, 0, 0));
            for (b, a) in before.iter().zip(after.iter()) {
                prop_assert!(a >= b, "{:?} dropped from {b} to {a}", TermCategory::ALL[category]);
            }
        }

        #[test]
        fn prop_numeric_proof_and_faq_pairs_never_lower_trust(
            base in prop::collection::vec(0usize..6, TermCategory::ALL.len()),
            numeric in 0usize..6,
            pairs in 0usize..6,
            extra_numeric in 0usize..10,
            extra_pairs in 0usize..10,
        ) {
            let before = all_dimensions(&pooled(&base, numeric, pairs));
            let after = all_dimensions(&pooled(&base, numeric + extra_numeric, pairs + extra_pairs));
            for (b, a) in before.iter().zip(after.iter()) {
                prop_assert!(a >= b);
            }
        }
    }
}
