//! Term lists per category, keyed by locale.
//!
//! Categories are data: the extractor only counts matches, the rubrics decide
//! what each category is worth.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lexical signal category. A term may appear in several categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    /// High-intensity emotional words ("breakthrough", "finally").
    PowerWords,
    /// Medium-intensity quality words ("premium", "elegant").
    SupportingWords,
    UrgencyWords,
    /// Certifications and testing claims.
    TrustWords,
    /// Warranty, guarantee and risk-reversal phrases.
    GuaranteePhrases,
    SocialProof,
    CtaPhrases,
    /// Robotic or corporate boilerplate ("cutting-edge", "leverage").
    GenericPhrases,
    ProblemPhrases,
    AgitationPhrases,
    SolutionPhrases,
    TransformationPhrases,
    BenefitPhrases,
    FeaturePhrases,
    /// Bullet labels that promise an outcome ("INSTANT CONFIDENCE").
    EmotionalLabels,
    ConversationalPhrases,
    EmpathyPhrases,
    ConfidencePhrases,
    /// Question openers that address real buyer objections.
    ConcernPhrases,
}

impl TermCategory {
    pub const ALL: [TermCategory; 19] = [
        TermCategory::PowerWords,
        TermCategory::SupportingWords,
        TermCategory::UrgencyWords,
        TermCategory::TrustWords,
        TermCategory::GuaranteePhrases,
        TermCategory::SocialProof,
        TermCategory::CtaPhrases,
        TermCategory::GenericPhrases,
        TermCategory::ProblemPhrases,
        TermCategory::AgitationPhrases,
        TermCategory::SolutionPhrases,
        TermCategory::TransformationPhrases,
        TermCategory::BenefitPhrases,
        TermCategory::FeaturePhrases,
        TermCategory::EmotionalLabels,
        TermCategory::ConversationalPhrases,
        TermCategory::EmpathyPhrases,
        TermCategory::ConfidencePhrases,
        TermCategory::ConcernPhrases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TermCategory::PowerWords => "power_words",
            TermCategory::SupportingWords => "supporting_words",
            TermCategory::UrgencyWords => "urgency_words",
            TermCategory::TrustWords => "trust_words",
            TermCategory::GuaranteePhrases => "guarantee_phrases",
            TermCategory::SocialProof => "social_proof",
            TermCategory::CtaPhrases => "cta_phrases",
            TermCategory::GenericPhrases => "generic_phrases",
            TermCategory::ProblemPhrases => "problem_phrases",
            TermCategory::AgitationPhrases => "agitation_phrases",
            TermCategory::SolutionPhrases => "solution_phrases",
            TermCategory::TransformationPhrases => "transformation_phrases",
            TermCategory::BenefitPhrases => "benefit_phrases",
            TermCategory::FeaturePhrases => "feature_phrases",
            TermCategory::EmotionalLabels => "emotional_labels",
            TermCategory::ConversationalPhrases => "conversational_phrases",
            TermCategory::EmpathyPhrases => "empathy_phrases",
            TermCategory::ConfidencePhrases => "confidence_phrases",
            TermCategory::ConcernPhrases => "concern_phrases",
        }
    }
}

/// Term lists for one locale. Missing categories behave as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermLists {
    lists: BTreeMap<TermCategory, Vec<String>>,
}

impl TermLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: TermCategory, terms: &[&str]) -> Self {
        self.lists
            .entry(category)
            .or_default()
            .extend(terms.iter().map(|t| t.to_string()));
        self
    }

    pub fn terms(&self, category: TermCategory) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.lists.values().all(Vec::is_empty)
    }

    /// Every term must be non-blank; a blank term would match everywhere.
    pub(crate) fn blank_terms(&self) -> Vec<TermCategory> {
        self.lists
            .iter()
            .filter(|(_, terms)| terms.iter().any(|t| t.trim().is_empty()))
            .map(|(c, _)| *c)
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in English tables
// ────────────────────────────────────────────────────────────────────────────

const EN_POWER_WORDS: &[&str] = &[
    "breakthrough",
    "revolutionary",
    "game-changing",
    "game-changer",
    "instantly",
    "finally",
    "obsessed",
    "never again",
    "secret",
    "unleash",
    "transform",
    "irresistible",
    "life-changing",
    "unstoppable",
    "mind-blowing",
    "jaw-dropping",
    "unbelievable",
    "phenomenal",
    "extraordinary",
];

const EN_SUPPORTING_WORDS: &[&str] = &[
    "amazing",
    "incredible",
    "perfect",
    "ultimate",
    "premium",
    "superior",
    "exceptional",
    "outstanding",
    "remarkable",
    "exclusive",
    "proven",
    "luxurious",
    "professional",
    "elegant",
    "sophisticated",
    "refined",
];

const EN_URGENCY_WORDS: &[&str] = &[
    "now",
    "today",
    "limited",
    "hurry",
    "expires",
    "last chance",
    "ending soon",
    "before they sell out",
];

const EN_TRUST_WORDS: &[&str] = &[
    "certified",
    "tested",
    "approved",
    "verified",
    "fda",
    "iso 9001",
    "bpa-free",
    "lab-tested",
];

const EN_GUARANTEE_PHRASES: &[&str] = &[
    "guarantee",
    "warranty",
    "money-back",
    "risk-free",
    "free returns",
    "satisfaction",
];

const EN_SOCIAL_PROOF: &[&str] = &[
    "customers",
    "reviews",
    "rated",
    "recommended",
    "trusted by",
    "testimonials",
    "best seller",
    "bestseller",
];

const EN_CTA_PHRASES: &[&str] = &[
    "order now",
    "buy today",
    "buy now",
    "add to cart",
    "get yours",
    "join thousands",
    "ready to",
    "click",
];

const EN_GENERIC_PHRASES: &[&str] = &[
    "state-of-the-art",
    "cutting-edge",
    "innovative solution",
    "comprehensive solution",
    "market-leading",
    "industry-standard",
    "world-class",
    "next-generation",
    "advanced technology",
    "enterprise-grade",
    "leverage",
    "synergy",
    "paradigm",
    "holistic",
    "best-in-class",
    "turnkey solution",
    "high quality product",
];

const EN_PROBLEM_PHRASES: &[&str] = &[
    "tired of",
    "frustrated",
    "struggle with",
    "struggling",
    "ever wondered",
    "hate when",
    "sick of",
];

const EN_AGITATION_PHRASES: &[&str] = &[
    "you're not alone",
    "millions struggle",
    "studies show",
    "research reveals",
    "worst part",
];

const EN_SOLUTION_PHRASES: &[&str] = &[
    "that's why we created",
    "that's why",
    "introducing",
    "now you can",
    "solution",
    "solves",
    "the answer",
];

const EN_TRANSFORMATION_PHRASES: &[&str] = &[
    "transform",
    "change your life",
    "never be the same",
    "revolutionize",
    "breakthrough",
    "finally",
    "never again",
];

const EN_BENEFIT_PHRASES: &[&str] = &[
    "helps you",
    "allows you to",
    "means you can",
    "so you",
    "experience",
    "enjoy",
    "feel",
    "discover",
    "achieve",
];

const EN_FEATURE_PHRASES: &[&str] = &["includes", "features", "comes with", "contains"];

const EN_EMOTIONAL_LABELS: &[&str] = &[
    "instant confidence",
    "never struggle",
    "breakthrough results",
    "life-changing",
    "game-changer",
    "finally",
    "transform your",
    "peace of mind",
    "effortless",
];

const EN_CONVERSATIONAL_PHRASES: &[&str] = &[
    "that's exactly",
    "great question",
    "absolutely",
    "actually",
    "honestly",
];

const EN_EMPATHY_PHRASES: &[&str] = &[
    "i understand",
    "we get it",
    "you're right",
    "that makes sense",
    "totally get",
];

const EN_CONFIDENCE_PHRASES: &[&str] = &[
    "guaranteed",
    "proven",
    "tested",
    "works every time",
    "you'll love",
];

const EN_CONCERN_PHRASES: &[&str] = &[
    "will this work",
    "what if",
    "how do i know",
    "is this worth",
    "compared to",
    "does it",
];

/// Complete English term lists.
pub fn english_terms() -> TermLists {
    TermLists::new()
        .with(TermCategory::PowerWords, EN_POWER_WORDS)
        .with(TermCategory::SupportingWords, EN_SUPPORTING_WORDS)
        .with(TermCategory::UrgencyWords, EN_URGENCY_WORDS)
        .with(TermCategory::TrustWords, EN_TRUST_WORDS)
        .with(TermCategory::GuaranteePhrases, EN_GUARANTEE_PHRASES)
        .with(TermCategory::SocialProof, EN_SOCIAL_PROOF)
        .with(TermCategory::CtaPhrases, EN_CTA_PHRASES)
        .with(TermCategory::GenericPhrases, EN_GENERIC_PHRASES)
        .with(TermCategory::ProblemPhrases, EN_PROBLEM_PHRASES)
        .with(TermCategory::AgitationPhrases, EN_AGITATION_PHRASES)
        .with(TermCategory::SolutionPhrases, EN_SOLUTION_PHRASES)
        .with(TermCategory::TransformationPhrases, EN_TRANSFORMATION_PHRASES)
        .with(TermCategory::BenefitPhrases, EN_BENEFIT_PHRASES)
        .with(TermCategory::FeaturePhrases, EN_FEATURE_PHRASES)
        .with(TermCategory::EmotionalLabels, EN_EMOTIONAL_LABELS)
        .with(TermCategory::ConversationalPhrases, EN_CONVERSATIONAL_PHRASES)
        .with(TermCategory::EmpathyPhrases, EN_EMPATHY_PHRASES)
        .with(TermCategory::ConfidencePhrases, EN_CONFIDENCE_PHRASES)
        .with(TermCategory::ConcernPhrases, EN_CONCERN_PHRASES)
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in localized tables (emotional, trust and CTA vocabulary)
// ────────────────────────────────────────────────────────────────────────────

pub fn german_terms() -> TermLists {
    TermLists::new()
        .with(
            TermCategory::PowerWords,
            &[
                "revolutionär",
                "bahnbrechend",
                "unglaublich",
                "endlich",
                "verwandelt",
                "ultimativ",
                "unwiderstehlich",
                "lebensverändernd",
            ],
        )
        .with(
            TermCategory::SupportingWords,
            &[
                "erstaunlich",
                "außergewöhnlich",
                "premium",
                "luxuriös",
                "elegant",
                "professionell",
                "hochwertig",
                "exklusiv",
                "bewährt",
                "perfekt",
            ],
        )
        .with(
            TermCategory::UrgencyWords,
            &["jetzt", "heute", "limitiert", "nur noch", "sofort"],
        )
        .with(
            TermCategory::TrustWords,
            &["zertifiziert", "geprüft", "getestet", "tüv", "made in germany"],
        )
        .with(
            TermCategory::GuaranteePhrases,
            &["garantie", "geld-zurück", "risikofrei", "gewährleistung"],
        )
        .with(
            TermCategory::SocialProof,
            &["kunden", "bewertungen", "empfohlen", "bestseller"],
        )
        .with(
            TermCategory::CtaPhrases,
            &["jetzt bestellen", "in den warenkorb", "jetzt kaufen", "sichern sie sich"],
        )
        .with(
            TermCategory::ProblemPhrases,
            &["kennen sie das", "genug von", "ärgern sie sich"],
        )
        .with(
            TermCategory::SolutionPhrases,
            &["deshalb haben wir", "die lösung", "endlich"],
        )
        .with(
            TermCategory::TransformationPhrases,
            &["verwandelt", "endlich", "nie wieder"],
        )
        .with(
            TermCategory::BenefitPhrases,
            &["genießen", "erleben", "mühelos", "bequem"],
        )
}

pub fn french_terms() -> TermLists {
    TermLists::new()
        .with(
            TermCategory::PowerWords,
            &[
                "révolutionnaire",
                "incroyable",
                "exceptionnel",
                "enfin",
                "transforme",
                "ultime",
                "irrésistible",
                "magique",
            ],
        )
        .with(
            TermCategory::SupportingWords,
            &[
                "élégant",
                "raffiné",
                "luxueux",
                "sophistiqué",
                "exclusif",
                "prestigieux",
                "supérieur",
                "remarquable",
                "authentique",
                "parfait",
            ],
        )
        .with(
            TermCategory::UrgencyWords,
            &["maintenant", "aujourd'hui", "limité", "vite", "dernière chance"],
        )
        .with(
            TermCategory::TrustWords,
            &["certifié", "testé", "approuvé", "vérifié"],
        )
        .with(
            TermCategory::GuaranteePhrases,
            &["garantie", "satisfait ou remboursé", "sans risque"],
        )
        .with(
            TermCategory::SocialProof,
            &["clients", "avis", "recommandé", "meilleure vente"],
        )
        .with(
            TermCategory::CtaPhrases,
            &["commandez", "ajoutez au panier", "achetez"],
        )
        .with(
            TermCategory::ProblemPhrases,
            &["marre de", "fatigué de", "vous en avez assez"],
        )
        .with(
            TermCategory::SolutionPhrases,
            &["c'est pourquoi", "la solution", "découvrez"],
        )
        .with(
            TermCategory::TransformationPhrases,
            &["transforme", "enfin", "plus jamais"],
        )
        .with(
            TermCategory::BenefitPhrases,
            &["profitez", "confortable", "pratique", "facile"],
        )
}

pub fn spanish_terms() -> TermLists {
    TermLists::new()
        .with(
            TermCategory::PowerWords,
            &[
                "revolucionario",
                "increíble",
                "excepcional",
                "finalmente",
                "transforma",
                "irresistible",
                "mágico",
            ],
        )
        .with(
            TermCategory::SupportingWords,
            &[
                "elegante",
                "refinado",
                "lujoso",
                "sofisticado",
                "exclusivo",
                "prestigioso",
                "superior",
                "extraordinario",
                "auténtico",
                "perfecto",
            ],
        )
        .with(
            TermCategory::UrgencyWords,
            &["ahora", "hoy", "limitado", "última oportunidad"],
        )
        .with(
            TermCategory::TrustWords,
            &["certificado", "probado", "aprobado", "verificado"],
        )
        .with(
            TermCategory::GuaranteePhrases,
            &["garantía", "devolución", "sin riesgo"],
        )
        .with(
            TermCategory::SocialProof,
            &["clientes", "reseñas", "recomendado", "más vendido"],
        )
        .with(
            TermCategory::CtaPhrases,
            &["compra ahora", "añadir al carrito", "pide hoy"],
        )
        .with(
            TermCategory::ProblemPhrases,
            &["cansado de", "harto de", "frustrado"],
        )
        .with(
            TermCategory::SolutionPhrases,
            &["por eso creamos", "la solución", "descubre"],
        )
        .with(
            TermCategory::TransformationPhrases,
            &["transforma", "finalmente", "nunca más"],
        )
        .with(
            TermCategory::BenefitPhrases,
            &["disfruta", "cómodo", "práctico", "fácil"],
        )
}

/// Built-in term lists keyed by locale code.
pub fn builtin_locale_terms() -> BTreeMap<String, TermLists> {
    BTreeMap::from([
        ("en".to_string(), english_terms()),
        ("de".to_string(), german_terms()),
        ("fr".to_string(), french_terms()),
        ("es".to_string(), spanish_terms()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_covers_every_category() {
        let terms = english_terms();
        for category in TermCategory::ALL {
            assert!(
                !terms.terms(category).is_empty(),
                "English table missing {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_missing_category_is_empty_slice() {
        let terms = german_terms();
        assert!(terms.terms(TermCategory::ConcernPhrases).is_empty());
        assert!(!terms.terms(TermCategory::PowerWords).is_empty());
    }

    #[test]
    fn test_json_round_uses_snake_case_keys() {
        let terms = TermLists::new().with(TermCategory::CtaPhrases, &["order now"]);
        let json = serde_json::to_string(&terms).unwrap();
        assert_eq!(json, r#"{"cta_phrases":["order now"]}"#);
    }

    #[test]
    fn test_blank_terms_detected() {
        let terms = TermLists::new().with(TermCategory::UrgencyWords, &["now", "  "]);
        assert_eq!(terms.blank_terms(), vec![TermCategory::UrgencyWords]);
    }

    #[test]
    fn test_builtin_tables_have_no_blank_terms() {
        for (code, terms) in builtin_locale_terms() {
            assert!(terms.blank_terms().is_empty(), "blank term in {code}");
        }
    }
}
