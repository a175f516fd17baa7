//! Keyword lexicons: per-locale cue terms that assign a packing category to
//! plain candidates, plus supplemental pools (materials, competitors,
//! occasions, high-volume phrases) appended after the caller's own keywords.

use serde::{Deserialize, Serialize};

use crate::keywords::tokenizer::{KeywordCandidate, KeywordCategory};
use crate::locale::Locale;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordLexicon {
    /// Whole-word cues marking competitor or material keywords.
    pub conquest_terms: Vec<String>,
    /// Whole-word cues marking occasion and gifting keywords.
    pub seasonal_terms: Vec<String>,
    /// Extra candidates packed only after every caller keyword.
    pub supplemental: Vec<KeywordCandidate>,
}

impl KeywordLexicon {
    pub fn is_empty(&self) -> bool {
        self.conquest_terms.is_empty()
            && self.seasonal_terms.is_empty()
            && self.supplemental.is_empty()
    }

    /// Category for a cleaned, folded keyword. Conquest cues win over
    /// seasonal ones; no cue leaves the keyword `Primary`.
    pub fn classify(&self, text: &str, locale: &Locale) -> KeywordCategory {
        if contains_any(text, &self.conquest_terms, locale) {
            KeywordCategory::Conquest
        } else if contains_any(text, &self.seasonal_terms, locale) {
            KeywordCategory::Seasonal
        } else {
            KeywordCategory::Primary
        }
    }

    /// First blank entry across the cue lists and the supplemental pool.
    pub fn blank_entry(&self) -> Option<&'static str> {
        let blank = |terms: &[String]| terms.iter().any(|t| t.trim().is_empty());
        if blank(&self.conquest_terms) {
            Some("conquest_terms")
        } else if blank(&self.seasonal_terms) {
            Some("seasonal_terms")
        } else if self.supplemental.iter().any(|c| c.text.trim().is_empty()) {
            Some("supplemental")
        } else {
            None
        }
    }
}

fn contains_any(text: &str, terms: &[String], locale: &Locale) -> bool {
    let padded = format!(" {text} ");
    terms.iter().any(|term| {
        let term = locale.fold(term.trim());
        !term.is_empty() && padded.contains(&format!(" {term} "))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in lexicons
// ────────────────────────────────────────────────────────────────────────────

const FR_CONQUEST_TERMS: &[&str] = &[
    "bambou",
    "plastique",
    "inox",
    "bois",
    "alternative",
    "mieux",
    "superieur",
    "supérieur",
    "remplace",
];

const FR_SEASONAL_TERMS: &[&str] = &[
    "cadeau",
    "cadeaux",
    "noel",
    "noël",
    "valentin",
    "saint-valentin",
    "mariage",
    "fete",
    "fête",
    "anniversaire",
];

const FR_MATERIALS: &[&str] = &[
    "bambou",
    "bois",
    "plastique",
    "inox",
    "acier inoxydable",
    "titane",
    "ceramique",
    "verre",
    "silicone",
    "caoutchouc",
    "alternative bambou",
    "remplace plastique",
    "mieux que bois",
    "superieur inox",
    "sans plastique",
    "anti bacterien",
    "non poreux",
    "durable",
];

const FR_COMPETITORS: &[&str] = &["ikea cuisine", "tefal ustensile", "joseph joseph"];

const FR_OCCASIONS: &[&str] = &[
    "cadeau noël",
    "cadeau noel",
    "cadeau",
    "idée cadeau",
    "idee cadeau",
    "cadeau cuisine",
    "fête",
    "noël",
];

const FR_HIGH_VOLUME: &[&str] = &[
    "cuisine professionnelle",
    "ustensiles cuisine",
    "qualité professionnelle",
    "made in france",
    "français",
    "française",
];

const DE_SEASONAL_TERMS: &[&str] = &[
    "geschenk",
    "geschenke",
    "weihnachten",
    "valentinstag",
    "muttertag",
    "vatertag",
    "geburtstag",
];

const DE_OCCASIONS: &[&str] = &[
    "geschenk weihnachten",
    "valentinstag geschenk",
    "muttertag geschenk",
    "vatertag geschenk",
    "geburtstag geschenk",
];

const DE_HIGH_VOLUME: &[&str] = &[
    "handventilator professionell",
    "mini ventilator büro",
    "tragbarer lüfter akku",
    "ventilator ohne lärm",
    "usb ventilator leise",
];

fn strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn pool(groups: &[(KeywordCategory, &[&str])]) -> Vec<KeywordCandidate> {
    groups
        .iter()
        .flat_map(|(category, terms)| {
            terms
                .iter()
                .map(move |t| KeywordCandidate::new(*t, *category))
        })
        .collect()
}

pub fn french_lexicon() -> KeywordLexicon {
    KeywordLexicon {
        conquest_terms: strings(FR_CONQUEST_TERMS),
        seasonal_terms: strings(FR_SEASONAL_TERMS),
        supplemental: pool(&[
            (KeywordCategory::Conquest, FR_MATERIALS),
            (KeywordCategory::Conquest, FR_COMPETITORS),
            (KeywordCategory::Seasonal, FR_OCCASIONS),
            (KeywordCategory::Generic, FR_HIGH_VOLUME),
        ]),
    }
}

pub fn german_lexicon() -> KeywordLexicon {
    KeywordLexicon {
        conquest_terms: Vec::new(),
        seasonal_terms: strings(DE_SEASONAL_TERMS),
        supplemental: pool(&[
            (KeywordCategory::Seasonal, DE_OCCASIONS),
            (KeywordCategory::Generic, DE_HIGH_VOLUME),
        ]),
    }
}

pub fn builtin_lexicons() -> Vec<(String, KeywordLexicon)> {
    vec![
        ("fr".to_string(), french_lexicon()),
        ("de".to_string(), german_lexicon()),
    ]
}
