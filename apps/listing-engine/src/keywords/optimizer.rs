//! Keyword Optimizer — normalize, pack and analyze a candidate pool for one
//! marketplace's backend search-terms field.
//!
//! When `enrich_pool` is set, the locale lexicon's supplemental pool is packed
//! into whatever space the caller's keywords leave.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::diagnostics::Diagnostic;
use crate::keywords::efficiency::{EfficiencyReport, EfficiencyReporter};
use crate::keywords::packer::{KeywordBudgetPacker, PackedKeywordSet};
use crate::keywords::tokenizer::{KeywordCandidate, KeywordTokenizer};
use crate::locale::Locale;

/// Everything produced for one backend keyword field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedKeywords {
    pub marketplace: String,
    pub locale: Locale,
    /// Rendered field value.
    pub backend_keywords: String,
    pub packed: PackedKeywordSet,
    pub efficiency: EfficiencyReport,
    /// Tokenizer and budget-lookup diagnostics. Packer diagnostics stay on `packed`.
    pub diagnostics: Vec<Diagnostic>,
}

pub struct KeywordOptimizer {
    config: Arc<EngineConfig>,
    packer: KeywordBudgetPacker,
    reporter: EfficiencyReporter,
}

impl KeywordOptimizer {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let packer = KeywordBudgetPacker::new(config.keywords.packing.clone());
        let reporter = EfficiencyReporter::new(config.keywords.efficiency_bands.clone());
        Self {
            config,
            packer,
            reporter,
        }
    }

    pub fn optimize(
        &self,
        candidates: &[KeywordCandidate],
        marketplace: &str,
        locale: &Locale,
    ) -> OptimizedKeywords {
        let keywords = &self.config.keywords;
        let mut diagnostics = Vec::new();

        let budget = match self.config.budget_for(marketplace) {
            Some(budget) => budget,
            None => {
                warn!(
                    "No byte budget configured for marketplace '{marketplace}'; using {}",
                    keywords.default_budget_bytes
                );
                diagnostics.push(Diagnostic::configuration_missing(format!(
                    "No byte budget for marketplace '{marketplace}'; default {} used",
                    keywords.default_budget_bytes
                )));
                keywords.default_budget_bytes
            }
        };

        let supplemental = match self.config.lexicon_for(locale) {
            Some(lexicon) if keywords.enrich_pool => lexicon.supplemental.as_slice(),
            _ => &[],
        };
        let normalized = KeywordTokenizer::new(&self.config).normalize_with(
            candidates,
            supplemental,
            locale,
        );
        diagnostics.extend(normalized.diagnostics);

        let packed = self
            .packer
            .pack(&normalized.tokens, budget, &keywords.separator);
        let efficiency = self.reporter.analyze(&packed);

        info!(
            "Backend keywords for '{marketplace}' ({locale}): {}/{} bytes, {} tokens, {:?}",
            efficiency.used_bytes, budget, efficiency.token_count, efficiency.efficiency_tier
        );

        OptimizedKeywords {
            marketplace: marketplace.to_string(),
            locale: locale.clone(),
            backend_keywords: packed.render(),
            packed,
            efficiency,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::keywords::efficiency::EfficiencyTier;
    use crate::keywords::tokenizer::{KeywordCategory, KeywordToken};

    fn optimizer() -> KeywordOptimizer {
        KeywordOptimizer::new(Arc::new(EngineConfig::default()))
    }

    fn pool(texts: &[&str]) -> Vec<KeywordCandidate> {
        texts.iter().map(|t| KeywordCandidate::from(*t)).collect()
    }

    #[test]
    fn test_known_marketplace_uses_249_bytes() {
        let out = optimizer().optimize(&pool(&["chef knife", "bamboo board"]), "com", &Locale::default());
        assert_eq!(out.packed.budget_bytes, 249);
        assert_eq!(out.backend_keywords, "chef knife, bamboo board");
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_marketplace_falls_back_with_diagnostic() {
        let out = optimizer().optimize(&pool(&["chef knife"]), "jp", &Locale::default());
        assert_eq!(out.packed.budget_bytes, 249);
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::ConfigurationMissing
        );
    }

    #[test]
    fn test_large_pool_stays_within_budget() {
        let candidates: Vec<KeywordCandidate> = (0..200)
            .map(|i| KeywordCandidate::new(format!("keyword{i}"), KeywordCategory::Generic))
            .collect();
        let out = optimizer().optimize(&candidates, "de", &Locale::new("de"));
        assert!(out.backend_keywords.len() <= 249);
        assert_eq!(out.efficiency.used_bytes, out.backend_keywords.len());
        assert_eq!(out.efficiency.efficiency_tier, EfficiencyTier::Excellent);
    }

    #[test]
    fn test_french_pool_gets_accent_free_variants() {
        let candidates = vec![
            KeywordCandidate::new("planche à découper", KeywordCategory::Primary),
            KeywordCandidate::new("bambou", KeywordCategory::Conquest),
        ];
        let out = optimizer().optimize(&candidates, "fr", &Locale::new("fr"));
        let texts = out.packed.texts();
        assert_eq!(texts[0], "bambou", "conquest terms pack first");
        assert!(texts.contains(&"planche à découper"));
        assert!(texts.contains(&"planche a decouper"));
    }

    #[test]
    fn test_field_never_repeats_a_term() {
        let out = optimizer().optimize(&pool(&["knife, board", "knife"]), "com", &Locale::new("en"));
        assert_eq!(out.backend_keywords, "knife, board");
        let terms: Vec<&str> = out.backend_keywords.split(", ").collect();
        let distinct: std::collections::HashSet<&str> = terms.iter().copied().collect();
        assert_eq!(terms.len(), distinct.len(), "field: {}", out.backend_keywords);
    }

    #[test]
    fn test_plain_french_pool_packs_conquest_first() {
        let out = optimizer().optimize(
            &pool(&["couteau", "cadeau cuisine", "planche bambou"]),
            "fr",
            &Locale::new("fr"),
        );
        let caller: Vec<&KeywordToken> = out.packed.tokens.iter().filter(|t| !t.supplemental).collect();
        assert_eq!(caller[0].text, "planche bambou");
        assert_eq!(caller[0].category, KeywordCategory::Conquest);
        let position = |text: &str| caller.iter().position(|t| t.text == text);
        assert!(position("planche bambou") < position("couteau"));
        assert!(position("couteau") < position("cadeau cuisine"));
    }

    #[test]
    fn test_locale_pool_fills_space_after_caller_keywords() {
        let out = optimizer().optimize(&pool(&["couteau"]), "fr", &Locale::new("fr"));
        let texts = out.packed.texts();
        assert_eq!(texts[0], "couteau", "caller keywords pack before the locale pool");
        assert!(texts.contains(&"bois"));
        assert!(out.efficiency.used_bytes <= 249);
        assert!(out.packed.tokens.iter().any(|t| t.supplemental));
    }

    #[test]
    fn test_enrichment_can_be_disabled() {
        let mut config = EngineConfig::default();
        config.keywords.enrich_pool = false;
        let out = KeywordOptimizer::new(Arc::new(config)).optimize(
            &pool(&["couteau"]),
            "fr",
            &Locale::new("fr"),
        );
        assert_eq!(out.packed.texts(), vec!["couteau", "couteaux"]);
    }
}
