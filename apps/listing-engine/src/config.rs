//! Engine configuration: term lists and morphology per locale, scoring weights,
//! grade bands, packing policy and marketplace budgets.
//!
//! Built-in defaults cover `en`, `de`, `fr` and `es`. A JSON document may
//! override any top-level section; a `locales` object replaces the built-in
//! locale table as a whole.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::EngineError;
use crate::keywords::efficiency::{default_tier_bands, TierBand};
use crate::keywords::lexicon::{builtin_lexicons, KeywordLexicon};
use crate::keywords::packer::PackingPolicy;
use crate::keywords::rules::{builtin_morphology, MorphologyRules};
use crate::locale::Locale;
use crate::quality::dimensions::DimensionWeights;
use crate::quality::terms::{builtin_locale_terms, TermLists};
use crate::telemetry::init_tracing;

// ────────────────────────────────────────────────────────────────────────────
// Configuration document
// ────────────────────────────────────────────────────────────────────────────

/// Term lists, optional morphology ruleset and keyword lexicon for one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleProfile {
    pub terms: TermLists,
    pub morphology: Option<MorphologyRules>,
    pub keywords: KeywordLexicon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub min_score: f64,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: DimensionWeights,
    /// Evaluated from the highest `min_score` down.
    pub grade_bands: Vec<GradeBand>,
    pub fallback_grade: String,
    /// Sub-scores below this fraction of their maximum emit an issue.
    pub issue_threshold: f64,
    pub max_action_items: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let band = |min_score: f64, grade: &str| GradeBand {
            min_score,
            grade: grade.to_string(),
        };
        Self {
            weights: DimensionWeights::default(),
            grade_bands: vec![
                band(9.0, "A+"),
                band(8.0, "A"),
                band(7.0, "B+"),
                band(6.0, "B"),
                band(5.0, "C"),
            ],
            fallback_grade: "F".to_string(),
            issue_threshold: 0.5,
            max_action_items: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub separator: String,
    /// Candidates shorter than this many characters are dropped.
    pub min_chars: usize,
    pub max_variants: usize,
    /// Append the locale's supplemental pool after the caller's candidates.
    pub enrich_pool: bool,
    pub default_budget_bytes: i64,
    pub marketplace_budgets: BTreeMap<String, i64>,
    pub packing: PackingPolicy,
    pub efficiency_bands: Vec<TierBand>,
}

const DEFAULT_BUDGET_BYTES: i64 = 249;
const DEFAULT_MARKETPLACES: &[&str] = &["com", "de", "fr", "it", "es", "co.uk"];

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            separator: ", ".to_string(),
            min_chars: 2,
            max_variants: 4,
            enrich_pool: true,
            default_budget_bytes: DEFAULT_BUDGET_BYTES,
            marketplace_budgets: DEFAULT_MARKETPLACES
                .iter()
                .map(|m| (m.to_string(), DEFAULT_BUDGET_BYTES))
                .collect(),
            packing: PackingPolicy::default(),
            efficiency_bands: default_tier_bands(),
        }
    }
}

/// Immutable engine configuration, shared through `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_locale: Locale,
    pub locales: BTreeMap<String, LocaleProfile>,
    pub scoring: ScoringConfig,
    pub keywords: KeywordConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut locales: BTreeMap<String, LocaleProfile> = builtin_locale_terms()
            .into_iter()
            .map(|(code, terms)| {
                (
                    code,
                    LocaleProfile {
                        terms,
                        ..LocaleProfile::default()
                    },
                )
            })
            .collect();
        for (code, rules) in builtin_morphology() {
            locales.entry(code).or_default().morphology = Some(rules);
        }
        for (code, lexicon) in builtin_lexicons() {
            locales.entry(code).or_default().keywords = lexicon;
        }
        Self {
            default_locale: Locale::default(),
            locales,
            scoring: ScoringConfig::default(),
            keywords: KeywordConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(EngineError::ConfigIo)
            .with_context(|| format!("Failed to read engine config '{}'", path.display()))?;
        let config = Self::from_json_str(&raw)
            .with_context(|| format!("Invalid engine config '{}'", path.display()))?;
        info!(
            "Loaded engine config from {} ({} locales)",
            path.display(),
            config.locales.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let w = &self.scoring.weights;
        if [w.emotion, w.conversion, w.trust, w.content]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(invalid("dimension weights must be finite and non-negative"));
        }
        if w.total() <= 0.0 {
            return Err(invalid("dimension weights must not all be zero"));
        }
        if !(0.0..=1.0).contains(&self.scoring.issue_threshold) {
            return Err(invalid("issue_threshold must be within [0, 1]"));
        }
        if self
            .scoring
            .grade_bands
            .iter()
            .any(|b| !b.min_score.is_finite() || b.grade.trim().is_empty())
        {
            return Err(invalid("grade bands need a finite min_score and a grade"));
        }
        if self.keywords.separator.is_empty() {
            return Err(invalid("keyword separator must not be empty"));
        }
        if self.keywords.min_chars == 0 {
            return Err(invalid("keyword min_chars must be at least 1"));
        }
        let order = &self.keywords.packing.category_order;
        if order
            .iter()
            .enumerate()
            .any(|(i, c)| order[..i].contains(c))
        {
            return Err(invalid("packing category_order lists a category twice"));
        }
        for (code, profile) in &self.locales {
            if let Some(category) = profile.terms.blank_terms().first() {
                return Err(invalid(&format!(
                    "locale '{code}' has a blank term in {}",
                    category.as_str()
                )));
            }
            if let Some(list) = profile.keywords.blank_entry() {
                return Err(invalid(&format!(
                    "locale '{code}' has a blank keyword entry in {list}"
                )));
            }
        }
        Ok(())
    }

    /// Profile for the exact locale code, falling back to its language.
    pub fn profile(&self, locale: &Locale) -> Option<&LocaleProfile> {
        self.locales
            .get(locale.as_str())
            .or_else(|| self.locales.get(locale.language()))
    }

    pub fn terms_for(&self, locale: &Locale) -> Option<&TermLists> {
        self.profile(locale).map(|p| &p.terms)
    }

    pub fn morphology_for(&self, locale: &Locale) -> Option<&MorphologyRules> {
        self.profile(locale).and_then(|p| p.morphology.as_ref())
    }

    pub fn lexicon_for(&self, locale: &Locale) -> Option<&KeywordLexicon> {
        self.profile(locale)
            .map(|p| &p.keywords)
            .filter(|l| !l.is_empty())
    }

    pub fn budget_for(&self, marketplace: &str) -> Option<i64> {
        self.keywords
            .marketplace_budgets
            .get(&marketplace.trim().to_lowercase())
            .copied()
    }

    pub fn grade_for(&self, score: f64) -> &str {
        self.scoring
            .grade_bands
            .iter()
            .filter(|b| score >= b.min_score)
            .max_by(|a, b| {
                a.min_score
                    .partial_cmp(&b.min_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|b| b.grade.as_str())
            .unwrap_or(self.scoring.fallback_grade.as_str())
    }
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidConfig(message.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Process settings
// ────────────────────────────────────────────────────────────────────────────

/// Startup settings read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub locale: Locale,
    pub rust_log: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Settings {
            config_path: std::env::var_os("LISTING_ENGINE_CONFIG").map(PathBuf::from),
            locale: Locale::new(
                &std::env::var("LISTING_ENGINE_LOCALE").unwrap_or_else(|_| "en".to_string()),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configured file if one is set, built-in defaults otherwise. The
    /// settings locale becomes the configuration's default locale.
    pub fn load_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config_path {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        config.default_locale = self.locale.clone();
        Ok(config)
    }

    /// Host startup: installs tracing with `rust_log` as this crate's level,
    /// then loads the config. A parseable `RUST_LOG` filter takes precedence.
    pub fn init(&self) -> Result<EngineConfig> {
        if !init_tracing(&self.rust_log) {
            tracing::debug!("Tracing subscriber already installed");
        }
        let config = self.load_config()?;
        info!(
            "Listing engine v{} ready (default locale '{}')",
            env!("CARGO_PKG_VERSION"),
            config.default_locale
        );
        Ok(config)
    }
}

/// Reads settings from the environment, starts tracing, loads the config and
/// installs it process-wide.
pub fn bootstrap() -> Result<Arc<EngineConfig>> {
    let settings = Settings::from_env()?;
    let config = settings.init()?;
    Ok(install(config)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Process-wide instance
// ────────────────────────────────────────────────────────────────────────────

static INSTALLED: OnceCell<Arc<EngineConfig>> = OnceCell::new();

/// Installs the process-wide configuration. Only the first call succeeds.
pub fn install(config: EngineConfig) -> Result<Arc<EngineConfig>, EngineError> {
    let config = Arc::new(config);
    INSTALLED
        .set(config.clone())
        .map_err(|_| invalid("engine configuration is already installed"))?;
    Ok(config)
}

/// The installed configuration, or built-in defaults when none was installed.
pub fn current() -> Arc<EngineConfig> {
    INSTALLED
        .get_or_init(|| Arc::new(EngineConfig::default()))
        .clone()
}
