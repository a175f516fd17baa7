//! Morphology rulesets: per-locale alternate word forms and spelling variants
//! used to widen a backend keyword pool.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Expansion rules for one locale.
///
/// `word_forms` replaces whole words (plurals, alternate forms);
/// `spelling_variants` are substring substitutions applied together
/// (accent or umlaut stripping).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphologyRules {
    #[serde(default)]
    pub word_forms: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub spelling_variants: BTreeMap<String, String>,
}

impl MorphologyRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forms(mut self, word: &str, forms: &[&str]) -> Self {
        self.word_forms
            .entry(word.to_string())
            .or_default()
            .extend(forms.iter().map(|f| f.to_string()));
        self
    }

    pub fn with_spelling(mut self, from: &str, to: &str) -> Self {
        self.spelling_variants
            .insert(from.to_string(), to.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.word_forms.is_empty() && self.spelling_variants.is_empty()
    }

    /// Variants of an already-folded `base`, never including `base` itself.
    ///
    /// Word forms come first in word order, then the spelling variant of the
    /// base and of every word-form variant. At most `max_variants` are returned.
    pub fn expand(&self, base: &str, max_variants: usize) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::from([base.to_string()]);
        let mut out = Vec::new();
        let mut push = |candidate: String, out: &mut Vec<String>| {
            if !candidate.is_empty() && seen.insert(candidate.clone()) {
                out.push(candidate);
            }
        };

        let words: Vec<&str> = base.split(' ').collect();
        for (i, word) in words.iter().enumerate() {
            let Some(forms) = self.word_forms.get(*word) else {
                continue;
            };
            for form in forms {
                let mut replaced = words.clone();
                replaced[i] = form.as_str();
                push(replaced.join(" "), &mut out);
            }
        }

        let mut spelled = Vec::new();
        for text in std::iter::once(base).chain(out.iter().map(String::as_str)) {
            let variant = self.respell(text);
            if variant != text {
                spelled.push(variant);
            }
        }
        for variant in spelled {
            push(variant, &mut out);
        }

        out.truncate(max_variants);
        out
    }

    fn respell(&self, text: &str) -> String {
        self.spelling_variants
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in rulesets
// ────────────────────────────────────────────────────────────────────────────

const FR_WORD_FORMS: &[(&str, &[&str])] = &[
    ("planche", &["planches"]),
    ("couteau", &["couteaux"]),
    ("ustensile", &["ustensiles"]),
    ("accessoire", &["accessoires"]),
    ("cuisine", &["cuisines"]),
    ("cadeau", &["cadeaux"]),
    ("produit", &["produits"]),
    ("article", &["articles"]),
    ("outil", &["outils"]),
    ("équipement", &["équipements"]),
    ("matériau", &["matériaux"]),
    ("professionnel", &["professionnels"]),
    ("portable", &["portables"]),
];

const FR_SPELLING: &[(&str, &str)] = &[
    ("é", "e"),
    ("è", "e"),
    ("ê", "e"),
    ("ë", "e"),
    ("à", "a"),
    ("â", "a"),
    ("ç", "c"),
    ("î", "i"),
    ("ï", "i"),
    ("ô", "o"),
    ("ù", "u"),
    ("û", "u"),
];

const DE_WORD_FORMS: &[(&str, &[&str])] = &[
    ("ventilator", &["ventilatoren"]),
    ("geschenk", &["geschenke"]),
    ("kühlung", &["kühlungen"]),
    ("messer", &["messern"]),
    ("flasche", &["flaschen"]),
];

const DE_SPELLING: &[(&str, &str)] = &[
    ("ä", "ae"),
    ("ö", "oe"),
    ("ü", "ue"),
    ("ß", "ss"),
];

fn ruleset(forms: &[(&str, &[&str])], spelling: &[(&str, &str)]) -> MorphologyRules {
    let rules = forms
        .iter()
        .fold(MorphologyRules::new(), |r, (word, f)| r.with_forms(word, f));
    spelling
        .iter()
        .fold(rules, |r, (from, to)| r.with_spelling(from, to))
}

pub fn french_rules() -> MorphologyRules {
    ruleset(FR_WORD_FORMS, FR_SPELLING)
}

pub fn german_rules() -> MorphologyRules {
    ruleset(DE_WORD_FORMS, DE_SPELLING)
}

/// Built-in rulesets keyed by locale code. English ships without one.
pub fn builtin_morphology() -> BTreeMap<String, MorphologyRules> {
    BTreeMap::from([
        ("fr".to_string(), french_rules()),
        ("de".to_string(), german_rules()),
    ])
}
