//! Section rubrics — per-section capped sub-scores for title, bullets,
//! description and FAQs.
//!
//! # Scoring rule
//! Every sub-score is `min(cap, count * weight)`, so repeating a signal beyond
//! its cap earns nothing more. A sub-score below `issue_threshold × cap` emits
//! an `Issue` with the severity declared on its `Signal`; otherwise it is
//! recorded as a strength.
//!
//! Generic/boilerplate phrases subtract a capped penalty. A section whose only
//! lexical signals are boilerplate scores 0 regardless of its length.

use serde::{Deserialize, Serialize};

use crate::quality::content::SectionKind;
use crate::quality::extractor::{Metrics, TextMetricExtractor};
use crate::quality::issues::{Issue, Severity};
use crate::quality::terms::TermCategory;

/// Score for one section after its rubric ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    #[serde(rename = "section_name")]
    pub section: SectionKind,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub feedback: String,
    pub strengths: Vec<String>,
    /// Section-level issues phrased as improvements.
    pub improvements: Vec<String>,
}

impl SectionScore {
    pub fn ratio(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score
        } else {
            0.0
        }
    }
}

/// Rubric output for one section.
#[derive(Debug, Clone)]
pub struct SectionOutcome {
    pub score: SectionScore,
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
    /// Parsed Q/A pairs; zero for every section but FAQs.
    pub faq_pairs: usize,
}

/// Diminishing-returns contribution of a counted signal.
pub fn capped(count: usize, weight: f64, cap: f64) -> f64 {
    (count as f64 * weight).min(cap).max(0.0)
}

pub fn max_score(kind: SectionKind) -> f64 {
    match kind {
        SectionKind::Title => 20.0,
        SectionKind::Bullets => 25.0,
        SectionKind::Description => 25.0,
        SectionKind::Faqs => 15.0,
        SectionKind::Listing => 0.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Signals
// ────────────────────────────────────────────────────────────────────────────

/// A weighted, capped signal and the issue emitted when it falls short.
/// Presence checks use `weight == cap`.
struct Signal {
    weight: f64,
    cap: f64,
    severity: Severity,
    strength: &'static str,
    message: &'static str,
    suggestion: &'static str,
    example: Option<&'static str>,
}

const GENERIC_PENALTY_WEIGHT: f64 = 1.0;
const GENERIC_PENALTY_CAP: f64 = 3.0;
const STUFFING_REPEAT_LIMIT: usize = 3;
const MIN_BULLETS: usize = 3;
const TARGET_BULLETS: usize = 5;
const MIN_DESCRIPTION_CHARS: usize = 500;
const TITLE_CHARS: std::ops::RangeInclusive<usize> = 50..=200;
const TARGET_FAQ_PAIRS: usize = 3;
const SPECIFIC_ANSWER_CHARS: usize = 50;
const MAX_POINTS_PER_BULLET: usize = 3;

const TITLE_LENGTH_POINTS: f64 = 3.0;
const BULLET_COUNT_POINTS: f64 = 3.0;

const TITLE_POWER: Signal = Signal {
    weight: 2.5,
    cap: 5.0,
    severity: Severity::Major,
    strength: "Strong emotional hook that captures attention",
    message: "Title lacks emotional engagement",
    suggestion: "Start with transformation language or urgent problem-solving words",
    example: Some("Never Struggle Again: Professional Translation Earbuds"),
};

const TITLE_URGENCY: Signal = Signal {
    weight: 2.0,
    cap: 4.0,
    severity: Severity::Minor,
    strength: "Includes urgency or transformation language",
    message: "Title has no urgency or transformation language",
    suggestion: "Add urgency or transformation words like 'Finally' or 'Never Again'",
    example: None,
};

const TITLE_BENEFITS: Signal = Signal {
    weight: 3.0,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Focuses on benefits over features",
    message: "Title lists features rather than benefits",
    suggestion: "Focus more on customer benefits than product features",
    example: None,
};

const TITLE_NO_GENERIC: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Major,
    strength: "Avoids robotic corporate language",
    message: "Contains robotic corporate language",
    suggestion: "Replace corporate jargon with emotional, conversational language",
    example: Some("Replace 'cutting-edge technology' with 'breakthrough that finally works'"),
};

const TITLE_NATURAL_KEYWORDS: Signal = Signal {
    weight: 3.0,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Keywords are naturally integrated",
    message: "Title repeats the same keyword more than three times",
    suggestion: "Integrate keywords more naturally into emotional hooks",
    example: None,
};

const BULLET_QUALITY: Signal = Signal {
    weight: 1.0,
    cap: 15.0,
    severity: Severity::Minor,
    strength: "Bullets combine labels, proof and outcomes",
    message: "Individual bullets lack labels, proof or emotional outcomes",
    suggestion: "Give every bullet a LABEL, a concrete number or proof, and a customer outcome",
    example: None,
};

const BULLET_LABELS: Signal = Signal {
    weight: 1.5,
    cap: 4.0,
    severity: Severity::Minor,
    strength: "Strong emotional labels that create desire",
    message: "Bullet labels are not emotional",
    suggestion: "Use emotional transformation labels like 'INSTANT CONFIDENCE' or 'NEVER STRUGGLE AGAIN'",
    example: Some("INSTANT CONFIDENCE: Feel like a local anywhere with real-time translation"),
};

const BULLET_SOCIAL_PROOF: Signal = Signal {
    weight: 1.5,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Includes social proof elements",
    message: "Bullets carry no social proof",
    suggestion: "Add social proof elements (customer numbers, testimonials)",
    example: None,
};

const BULLET_BENEFITS: Signal = Signal {
    weight: 4.0,
    cap: 4.0,
    severity: Severity::Major,
    strength: "Focuses on customer benefits over product features",
    message: "Bullets are too feature-focused instead of benefit-focused",
    suggestion: "Rewrite bullets to focus on customer outcomes and emotional benefits",
    example: Some("Instead of 'Features real-time translation' use 'INSTANT CONFIDENCE: Feel like a local anywhere'"),
};

const DESC_LENGTH: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Comprehensive description length",
    message: "Description is shorter than 500 characters",
    suggestion: "Expand description to at least 500 characters for better engagement",
    example: None,
};

const DESC_STRUCTURE: Signal = Signal {
    weight: 6.0,
    cap: 6.0,
    severity: Severity::Major,
    strength: "Clear problem-solution structure",
    message: "Missing Problem-Agitation-Solution structure",
    suggestion: "Start with the customer's pain point, agitate it, then present the product as the solution",
    example: Some("Tired of language barriers? You're not alone. That's exactly why we created..."),
};

const DESC_AGITATION: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Agitates the problem before the solution",
    message: "Problem is stated but never agitated",
    suggestion: "Add an agitation line to intensify the problem before presenting the solution",
    example: None,
};

const DESC_SOCIAL_PROOF: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Includes social proof elements",
    message: "Description has no social proof",
    suggestion: "Add social proof with customer numbers or testimonials",
    example: None,
};

const DESC_NUMERIC_PROOF: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Includes specific social proof with numbers",
    message: "Social proof is not backed by numbers",
    suggestion: "Quote a specific number of customers, reviews or stars",
    example: Some("Join 12,000+ customers who switched this year"),
};

const DESC_CTA: Signal = Signal {
    weight: 3.0,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Includes compelling call-to-action",
    message: "Description ends without a call-to-action",
    suggestion: "Add a strong call-to-action with emotional appeal",
    example: None,
};

const DESC_URGENCY: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Creates urgency to drive action",
    message: "Description creates no urgency",
    suggestion: "Add urgency elements like 'limited time' or 'before they sell out'",
    example: None,
};

const DESC_TRANSFORMATION: Signal = Signal {
    weight: 3.0,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Uses powerful transformation language",
    message: "Description has no transformation language",
    suggestion: "Paint a picture of the customer's improved life after buying",
    example: None,
};

const DESC_NO_GENERIC: Signal = Signal {
    weight: 3.0,
    cap: 3.0,
    severity: Severity::Major,
    strength: "Uses natural, conversational language",
    message: "Contains robotic or corporate language",
    suggestion: "Replace jargon with conversational language that speaks to customers directly",
    example: Some("Replace 'innovative solution' with 'game-changing breakthrough'"),
};

const FAQ_PAIRS: Signal = Signal {
    weight: 3.0,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Good number of FAQ pairs",
    message: "Fewer than three Q&A pairs",
    suggestion: "Add more FAQ pairs (aim for 3-5 comprehensive Q&As)",
    example: None,
};

const FAQ_CONVERSATIONAL: Signal = Signal {
    weight: 1.5,
    cap: 4.0,
    severity: Severity::Minor,
    strength: "FAQs use natural, conversational tone",
    message: "FAQ answers sound scripted",
    suggestion: "Make answers conversational with phrases like 'That's exactly' or 'Great question'",
    example: None,
};

const FAQ_EMPATHY: Signal = Signal {
    weight: 2.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Shows empathy and understanding of customer concerns",
    message: "FAQ answers show no empathy",
    suggestion: "Acknowledge customer feelings and concerns in the answers",
    example: None,
};

const FAQ_CONFIDENCE: Signal = Signal {
    weight: 1.5,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Builds confidence and reduces purchase anxiety",
    message: "FAQ answers do not build confidence",
    suggestion: "Add confidence-building elements like guarantees or proof points",
    example: None,
};

const FAQ_SPECIFIC: Signal = Signal {
    weight: 1.0,
    cap: 3.0,
    severity: Severity::Minor,
    strength: "Provides specific, detailed answers",
    message: "FAQ answers are vague",
    suggestion: "Make answers specific with examples, numbers or detailed explanations",
    example: None,
};

const FAQ_CONCERNS: Signal = Signal {
    weight: 1.0,
    cap: 2.0,
    severity: Severity::Minor,
    strength: "Addresses real customer concerns and objections",
    message: "FAQ questions avoid real buyer objections",
    suggestion: "Focus on real customer concerns rather than generic product questions",
    example: Some("Q: What if it doesn't fit my kitchen?"),
};

/// Categories that count as genuine (non-boilerplate) signal.
const POSITIVE_CATEGORIES: &[TermCategory] = &[
    TermCategory::PowerWords,
    TermCategory::SupportingWords,
    TermCategory::UrgencyWords,
    TermCategory::TrustWords,
    TermCategory::GuaranteePhrases,
    TermCategory::SocialProof,
    TermCategory::CtaPhrases,
    TermCategory::ProblemPhrases,
    TermCategory::AgitationPhrases,
    TermCategory::SolutionPhrases,
    TermCategory::TransformationPhrases,
    TermCategory::BenefitPhrases,
    TermCategory::EmotionalLabels,
    TermCategory::ConversationalPhrases,
    TermCategory::EmpathyPhrases,
    TermCategory::ConfidencePhrases,
    TermCategory::ConcernPhrases,
];

// ────────────────────────────────────────────────────────────────────────────
// Score card
// ────────────────────────────────────────────────────────────────────────────

struct Card {
    section: SectionKind,
    max_score: f64,
    issue_threshold: f64,
    earned: f64,
    penalty: f64,
    boilerplate: bool,
    strengths: Vec<String>,
    improvements: Vec<String>,
    issues: Vec<Issue>,
}

impl Card {
    fn new(section: SectionKind, issue_threshold: f64) -> Self {
        Self {
            section,
            max_score: max_score(section),
            issue_threshold,
            earned: 0.0,
            penalty: 0.0,
            boilerplate: false,
            strengths: Vec::new(),
            improvements: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn apply(&mut self, signal: &Signal, count: usize) {
        let earned = capped(count, signal.weight, signal.cap);
        self.record(
            earned,
            signal.cap,
            signal.severity,
            signal.strength,
            signal.message.to_string(),
            signal.suggestion,
            signal.example,
        );
    }

    fn check(&mut self, signal: &Signal, present: bool) {
        self.apply(signal, usize::from(present));
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        earned: f64,
        max: f64,
        severity: Severity,
        strength: &str,
        message: String,
        suggestion: &str,
        example: Option<&str>,
    ) {
        self.earned += earned;
        if earned < self.issue_threshold * max {
            self.improvements.push(suggestion.to_string());
            self.issues.push(
                Issue::new(severity, self.section, message, suggestion)
                    .with_example(example)
                    .with_impact(max - earned),
            );
        } else {
            self.strengths.push(strength.to_string());
        }
    }

    fn improve(&mut self, improvement: String) {
        self.improvements.push(improvement);
    }

    /// Subtracts the boilerplate penalty and flags sections that are only boilerplate.
    fn penalize_generic(&mut self, metrics: &Metrics) {
        let generic = metrics.count(TermCategory::GenericPhrases);
        if generic == 0 {
            return;
        }
        self.penalty += capped(generic, GENERIC_PENALTY_WEIGHT, GENERIC_PENALTY_CAP);
        if !POSITIVE_CATEGORIES.iter().any(|c| metrics.has(*c)) {
            self.boilerplate = true;
            self.issues.push(
                Issue::new(
                    Severity::Major,
                    self.section,
                    format!("{} reads as generic boilerplate", self.section.label()),
                    "Rewrite with concrete benefits, proof and emotional outcomes instead of stock phrases",
                )
                .with_impact(self.max_score),
            );
            self.improve("Replace boilerplate phrases with specific, customer-focused copy".to_string());
        }
    }

    fn finish(self) -> (SectionScore, Vec<Issue>) {
        let score = if self.boilerplate {
            0.0
        } else {
            (self.earned - self.penalty).clamp(0.0, self.max_score)
        };
        let percentage = if self.max_score > 0.0 {
            round1(score / self.max_score * 100.0)
        } else {
            0.0
        };
        let section_score = SectionScore {
            section: self.section,
            score,
            max_score: self.max_score,
            percentage,
            feedback: compile_feedback(score, self.max_score),
            strengths: self.strengths,
            improvements: self.improvements,
        };
        (section_score, self.issues)
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn compile_feedback(score: f64, max_score: f64) -> String {
    let feedback = if score >= max_score {
        "Perfect! This section hits all the marks for emotional engagement and conversion."
    } else if score >= max_score * 0.8 {
        "Strong performance with room for minor improvements."
    } else if score >= max_score * 0.6 {
        "Good foundation but needs enhancement for maximum impact."
    } else {
        "Significant improvements needed to reach conversion-focused quality."
    };
    feedback.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Rubrics
// ────────────────────────────────────────────────────────────────────────────

/// Runs the section rubrics with a locale's extractor.
pub struct SectionRubric<'a> {
    extractor: TextMetricExtractor<'a>,
    issue_threshold: f64,
}

impl<'a> SectionRubric<'a> {
    pub fn new(extractor: TextMetricExtractor<'a>, issue_threshold: f64) -> Self {
        Self {
            extractor,
            issue_threshold,
        }
    }

    /// Scores non-empty section text. Empty sections go through `missing`.
    pub fn score(&self, kind: SectionKind, text: &str) -> SectionOutcome {
        let metrics = self.extractor.extract(text);
        let mut faq_pairs = 0;
        let card = match kind {
            SectionKind::Title => self.title(&metrics),
            SectionKind::Bullets => self.bullets(text, &metrics),
            SectionKind::Description => self.description(&metrics),
            SectionKind::Faqs => {
                let pairs = parse_faq_pairs(text);
                faq_pairs = pairs.len();
                self.faqs(&pairs, &metrics)
            }
            SectionKind::Listing => Card::new(kind, self.issue_threshold),
        };
        let (score, issues) = card.finish();
        SectionOutcome {
            score,
            issues,
            metrics,
            faq_pairs,
        }
    }

    fn title(&self, m: &Metrics) -> Card {
        let mut card = Card::new(SectionKind::Title, self.issue_threshold);

        let len = m.char_length;
        if TITLE_CHARS.contains(&len) {
            card.record(
                TITLE_LENGTH_POINTS,
                TITLE_LENGTH_POINTS,
                Severity::Minor,
                "Title length is optimized for the marketplace",
                String::new(),
                "",
                None,
            );
        } else if len < *TITLE_CHARS.start() {
            card.record(
                0.0,
                TITLE_LENGTH_POINTS,
                Severity::Major,
                "",
                format!("Title too short ({len} chars) - missing keyword opportunities"),
                "Expand title to 150-200 characters with more keywords and benefits",
                Some("The Cleaning Tool Busy Parents Are Obsessed With - Premium Microfiber Kit"),
            );
        } else {
            card.record(
                0.0,
                TITLE_LENGTH_POINTS,
                Severity::Minor,
                "",
                format!("Title too long ({len} chars) - may be truncated"),
                "Trim to 200 characters while keeping the emotional hook and main keywords",
                None,
            );
        }

        card.apply(&TITLE_POWER, m.count(TermCategory::PowerWords));
        card.apply(
            &TITLE_URGENCY,
            m.count(TermCategory::UrgencyWords) + m.count(TermCategory::TransformationPhrases),
        );
        card.check(
            &TITLE_BENEFITS,
            m.count(TermCategory::BenefitPhrases) > m.count(TermCategory::FeaturePhrases),
        );
        card.check(&TITLE_NO_GENERIC, !m.has(TermCategory::GenericPhrases));
        card.check(
            &TITLE_NATURAL_KEYWORDS,
            m.max_word_repeat <= STUFFING_REPEAT_LIMIT,
        );
        card.penalize_generic(m);
        card
    }

    fn bullets(&self, text: &str, m: &Metrics) -> Card {
        let mut card = Card::new(SectionKind::Bullets, self.issue_threshold);
        let bullets: Vec<&str> = text
            .lines()
            .map(clean_bullet)
            .filter(|b| !b.is_empty())
            .collect();

        let n = bullets.len();
        if n >= TARGET_BULLETS {
            card.record(
                BULLET_COUNT_POINTS,
                BULLET_COUNT_POINTS,
                Severity::Minor,
                "Good number of bullet points for comprehensive coverage",
                String::new(),
                "",
                None,
            );
        } else {
            let severity = if n < MIN_BULLETS {
                Severity::Major
            } else {
                Severity::Minor
            };
            card.record(
                0.0,
                BULLET_COUNT_POINTS,
                severity,
                "",
                format!("Only {n} bullets found - need at least {TARGET_BULLETS} for maximum impact"),
                "Create 5 comprehensive bullets covering different benefits",
                None,
            );
        }

        let mut quality_points = 0;
        let mut emotional_labels = 0;
        let mut social_proof = 0;
        let mut benefit_heavy = 0;
        let mut feature_heavy = 0;

        for (i, bullet) in bullets.iter().enumerate() {
            let mut points = 0;
            match bullet.split_once(':') {
                Some((label, _)) if is_upper_label(label) => {
                    points += 1;
                    if self.extractor.count_in(label, TermCategory::EmotionalLabels) > 0 {
                        emotional_labels += 1;
                        points += 2;
                    }
                }
                _ => card.improve(format!(
                    "Bullet {}: Use format 'EMOTIONAL LABEL: benefit explanation'",
                    i + 1
                )),
            }
            if self.extractor.count_in(bullet, TermCategory::SocialProof) > 0 {
                social_proof += 1;
                points += 1;
            }
            if self.extractor.count_in(bullet, TermCategory::BenefitPhrases) > 0 {
                benefit_heavy += 1;
                points += 1;
            }
            if self.extractor.count_in(bullet, TermCategory::FeaturePhrases) > 0 {
                feature_heavy += 1;
            }
            if bullet.chars().any(|c| c.is_ascii_digit())
                || self.extractor.count_in(bullet, TermCategory::TrustWords) > 0
            {
                points += 1;
            }
            quality_points += points.min(MAX_POINTS_PER_BULLET);
        }

        card.apply(&BULLET_QUALITY, quality_points);
        card.apply(&BULLET_LABELS, emotional_labels);
        card.apply(&BULLET_SOCIAL_PROOF, social_proof);
        card.check(&BULLET_BENEFITS, benefit_heavy > feature_heavy);
        card.penalize_generic(m);
        card
    }

    fn description(&self, m: &Metrics) -> Card {
        let mut card = Card::new(SectionKind::Description, self.issue_threshold);
        card.check(&DESC_LENGTH, m.char_length >= MIN_DESCRIPTION_CHARS);
        card.check(
            &DESC_STRUCTURE,
            m.has(TermCategory::ProblemPhrases) && m.has(TermCategory::SolutionPhrases),
        );
        card.check(&DESC_AGITATION, m.has(TermCategory::AgitationPhrases));
        card.check(&DESC_SOCIAL_PROOF, m.has(TermCategory::SocialProof));
        card.check(&DESC_NUMERIC_PROOF, m.numeric_social_proof > 0);
        card.apply(&DESC_CTA, m.count(TermCategory::CtaPhrases));
        card.check(&DESC_URGENCY, m.has(TermCategory::UrgencyWords));
        card.check(
            &DESC_TRANSFORMATION,
            m.has(TermCategory::TransformationPhrases),
        );
        card.check(&DESC_NO_GENERIC, !m.has(TermCategory::GenericPhrases));
        card.penalize_generic(m);
        card
    }

    fn faqs(&self, pairs: &[FaqPair<'_>], m: &Metrics) -> Card {
        let mut card = Card::new(SectionKind::Faqs, self.issue_threshold);
        let answers_with = |category| {
            pairs
                .iter()
                .filter(|p| self.extractor.count_in(p.answer, category) > 0)
                .count()
        };

        card.check(&FAQ_PAIRS, pairs.len() >= TARGET_FAQ_PAIRS);
        card.apply(
            &FAQ_CONVERSATIONAL,
            answers_with(TermCategory::ConversationalPhrases),
        );
        card.apply(&FAQ_EMPATHY, answers_with(TermCategory::EmpathyPhrases));
        card.apply(&FAQ_CONFIDENCE, answers_with(TermCategory::ConfidencePhrases));

        let specific = pairs
            .iter()
            .filter(|p| {
                p.answer.chars().count() > SPECIFIC_ANSWER_CHARS
                    && (p.answer.chars().any(|c| c.is_ascii_digit())
                        || self.extractor.fold(p.answer).contains("example"))
            })
            .count();
        card.apply(&FAQ_SPECIFIC, specific);

        let concerns = pairs
            .iter()
            .filter(|p| self.extractor.count_in(p.question, TermCategory::ConcernPhrases) > 0)
            .count();
        card.apply(&FAQ_CONCERNS, concerns);
        card.penalize_generic(m);
        card
    }
}

/// Zero score and a "missing content" issue for an absent or blank section.
pub fn missing(kind: SectionKind) -> (SectionScore, Issue) {
    let (severity, message, suggestion, example) = match kind {
        SectionKind::Title => (
            Severity::Critical,
            "Title is missing or empty",
            "Create a compelling title with emotional hook and primary keywords",
            "Finally, Translation Earbuds That Actually Work in Real Conversations",
        ),
        SectionKind::Bullets => (
            Severity::Critical,
            "Bullet points are missing",
            "Create 5 benefit-focused bullets with emotional outcomes",
            "INSTANT CONFIDENCE: Feel like a local anywhere with real-time translation",
        ),
        SectionKind::Description => (
            Severity::Critical,
            "Product description is missing",
            "Create a compelling description with Problem-Agitation-Solution structure",
            "Tired of awkward language barriers? You're not alone. That's why we created...",
        ),
        SectionKind::Faqs => (
            Severity::Major,
            "FAQs are missing - major trust-building opportunity lost",
            "Create 3-5 FAQs that address real customer concerns in a conversational tone",
            "Q: Will this work for someone terrible with technology? A: That's exactly who we designed it for!",
        ),
        SectionKind::Listing => (
            Severity::Critical,
            "Listing has no content to evaluate",
            "Provide a title, bullet points, a description and FAQs",
            "Title, 5 bullets, a Problem-Agitation-Solution description and 3-5 FAQs",
        ),
    };
    let max = max_score(kind);
    let score = SectionScore {
        section: kind,
        score: 0.0,
        max_score: max,
        percentage: 0.0,
        feedback: format!("{} is missing", kind.label()),
        strengths: Vec::new(),
        improvements: vec![suggestion.to_string()],
    };
    let issue = Issue::new(severity, kind, message, suggestion)
        .with_example(Some(example))
        .with_impact(max);
    (score, issue)
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FaqPair<'t> {
    pub question: &'t str,
    pub answer: &'t str,
}

/// Groups `Q:` / `A:` lines into pairs. An answer without a pending question is dropped.
pub(crate) fn parse_faq_pairs(text: &str) -> Vec<FaqPair<'_>> {
    let mut pairs = Vec::new();
    let mut pending: Option<&str> = None;
    for line in text.lines().map(str::trim) {
        if let Some(q) = strip_marker(line, 'Q') {
            pending = Some(q);
        } else if let Some(a) = strip_marker(line, 'A') {
            if let Some(question) = pending.take() {
                pairs.push(FaqPair {
                    question,
                    answer: a,
                });
            }
        }
    }
    pairs
}

fn strip_marker(line: &str, marker: char) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if first.to_ascii_uppercase() != marker {
        return None;
    }
    chars.as_str().strip_prefix(':').map(str::trim)
}

fn clean_bullet(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['-', '*', '•', '·'])
        .trim()
}

/// True when the label has letters and all of them are uppercase.
fn is_upper_label(label: &str) -> bool {
    let mut letters = label.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::quality::terms::english_terms;

    fn with_rubric<T>(f: impl FnOnce(&SectionRubric<'_>) -> T) -> T {
        let terms = english_terms();
        let locale = Locale::default();
        let rubric = SectionRubric::new(TextMetricExtractor::new(&terms, &locale), 0.5);
        f(&rubric)
    }

    fn score(kind: SectionKind, text: &str) -> SectionOutcome {
        with_rubric(|r| r.score(kind, text))
    }

    const STRONG_TITLE: &str =
        "Finally, the Breakthrough Chef Knife Home Cooks Enjoy - Feel Confident Slicing Anything Today";

    #[test]
    fn test_capped_applies_diminishing_returns() {
        assert_eq!(capped(1, 2.5, 5.0), 2.5);
        assert_eq!(capped(2, 2.5, 5.0), 5.0);
        assert_eq!(capped(40, 2.5, 5.0), 5.0);
        assert_eq!(capped(0, 2.5, 5.0), 0.0);
    }

    #[test]
    fn test_strong_title_scores_high() {
        let out = score(SectionKind::Title, STRONG_TITLE);
        assert!(
            out.score.score >= 16.0,
            "Expected ≥16, got {}",
            out.score.score
        );
        assert!(out.score.score <= out.score.max_score);
    }

    #[test]
    fn test_short_flat_title_emits_major_issues() {
        let out = score(SectionKind::Title, "Kitchen knife");
        assert!(out.score.score < 10.0);
        assert!(out
            .issues
            .iter()
            .any(|i| i.severity == Severity::Major && i.message.contains("too short")));
        assert!(out
            .issues
            .iter()
            .any(|i| i.message == "Title lacks emotional engagement"));
    }

    #[test]
    fn test_stuffed_title_loses_natural_keyword_points() {
        let stuffed = "Knife knife knife knife chef knife set for every kitchen and every cook today";
        let out = score(SectionKind::Title, stuffed);
        assert!(out
            .issues
            .iter()
            .any(|i| i.message.contains("more than three times")));
    }

    #[test]
    fn test_title_power_words_are_monotonic_up_to_cap() {
        let base = "A chef knife for home cooks who want clean, effortless cuts every single day";
        let mut previous = score(SectionKind::Title, base).score.score;
        for extra in ["finally", "breakthrough", "phenomenal", "unstoppable"] {
            let text = format!("{extra} {base}");
            let current = score(SectionKind::Title, &text).score.score;
            assert!(
                current >= previous,
                "adding '{extra}' dropped score {previous} → {current}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_well_formed_bullets_score_high() {
        let bullets = "INSTANT CONFIDENCE: Feel like a pro with a blade trusted by 5,000 customers\n\
             NEVER STRUGGLE AGAIN: Enjoy effortless slicing so you finish prep in 10 minutes\n\
             PEACE OF MIND: Tested and certified steel that helps you cook safely\n\
             EFFORTLESS CARE: Discover a dishwasher-safe knife rated 4.8 stars by reviews\n\
             TRANSFORM YOUR KITCHEN: Experience restaurant results at home in 3 easy steps";
        let out = score(SectionKind::Bullets, bullets);
        assert!(out.score.score >= 20.0, "got {}", out.score.score);
        assert!(!out
            .issues
            .iter()
            .any(|i| i.message.contains("feature-focused")));
    }

    #[test]
    fn test_two_feature_bullets_are_major_issue() {
        let bullets = "Includes a steel blade\nComes with a wooden handle";
        let out = score(SectionKind::Bullets, bullets);
        let majors: Vec<&Issue> = out
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Major)
            .collect();
        assert!(majors.iter().any(|i| i.message.contains("Only 2 bullets")));
        assert!(majors.iter().any(|i| i.message.contains("feature-focused")));
        assert!(out
            .score
            .improvements
            .iter()
            .any(|s| s.starts_with("Bullet 1:")));
    }

    #[test]
    fn test_description_problem_solution_structure() {
        let with = score(
            SectionKind::Description,
            "Tired of dull knives? That's why we created a blade that stays sharp.",
        );
        let without = score(
            SectionKind::Description,
            "A blade made of steel with a handle of wood.",
        );
        assert!(with.score.score > without.score.score);
        assert!(without
            .issues
            .iter()
            .any(|i| i.message.contains("Problem-Agitation-Solution")));
    }

    #[test]
    fn test_boilerplate_only_section_scores_zero() {
        let text = "A state-of-the-art, cutting-edge, world-class, best-in-class, next-generation \
                    item built with advanced technology for a holistic paradigm. "
            .repeat(10);
        let out = score(SectionKind::Description, &text);
        assert_eq!(out.score.score, 0.0);
        assert!(out
            .issues
            .iter()
            .any(|i| i.message.contains("generic boilerplate")));
    }

    #[test]
    fn test_generic_phrases_reduce_score() {
        let clean = score(SectionKind::Title, STRONG_TITLE).score.score;
        let jargon = format!("{STRONG_TITLE} cutting-edge");
        let penalized = score(SectionKind::Title, &jargon).score.score;
        assert!(penalized < clean, "{penalized} should be < {clean}");
    }

    #[test]
    fn test_faq_pairs_parsed() {
        let faqs = "Q: Will this work for left-handed cooks?\n\
                    A: Absolutely! The symmetric handle works for both hands.\n\
                    A: orphan answer\n\
                    q: Is it dishwasher safe?\n\
                    a: Yes.";
        let pairs = parse_faq_pairs(faqs);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].question, "Will this work for left-handed cooks?");
        assert_eq!(pairs[1].answer, "Yes.");
    }

    #[test]
    fn test_faq_outcome_reports_pair_count() {
        let faqs = "Q: What if it dulls?\nA: Honestly, it's guaranteed for 10 years - for example we resharpen it free of charge.\n\
                    Q: How do I know it fits?\nA: We get it. It is 20 cm long and fits standard blocks, guaranteed.\n\
                    Q: Compared to ceramic?\nA: Actually, steel is tested to last 3x longer than ceramic in daily use.";
        let out = score(SectionKind::Faqs, faqs);
        assert_eq!(out.faq_pairs, 3);
        assert!(out.score.score >= 12.0, "got {}", out.score.score);
    }

    #[test]
    fn test_missing_section_is_critical_except_faqs() {
        let (score, issue) = missing(SectionKind::Title);
        assert_eq!(score.score, 0.0);
        assert_eq!(issue.severity, Severity::Critical);
        assert!(issue.message.contains("missing"));

        let (_, faq_issue) = missing(SectionKind::Faqs);
        assert_eq!(faq_issue.severity, Severity::Major);
        assert!(faq_issue.message.contains("missing"));
    }

    #[test]
    fn test_missing_listing_has_its_own_message() {
        let (score, issue) = missing(SectionKind::Listing);
        assert_eq!(score.max_score, 0.0);
        assert_eq!(issue.section, SectionKind::Listing);
        assert!(!issue.message.contains("FAQ"), "got: {}", issue.message);
        assert!(!score.improvements[0].starts_with("Create 3-5 FAQs"));
    }

    #[test]
    fn test_upper_label_detection() {
        assert!(is_upper_label("INSTANT CONFIDENCE"));
        assert!(is_upper_label("100% SAFE"));
        assert!(!is_upper_label("Instant confidence"));
        assert!(!is_upper_label("123"));
    }
}
