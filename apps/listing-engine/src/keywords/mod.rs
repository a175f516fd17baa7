// Backend keyword budget optimization.
// Implements: candidate normalization, locale categories and pools, morphology expansion,
// byte-budget packing, efficiency tiers.
// Budgets are UTF-8 byte counts, never character counts.

pub mod efficiency;
pub mod lexicon;
pub mod optimizer;
pub mod packer;
pub mod rules;
pub mod tokenizer;

pub use efficiency::{EfficiencyReport, EfficiencyReporter, EfficiencyTier, TierBand};
pub use lexicon::KeywordLexicon;
pub use optimizer::{KeywordOptimizer, OptimizedKeywords};
pub use packer::{KeywordBudgetPacker, PackedKeywordSet, PackingPolicy, SkipReason, SkippedToken};
pub use rules::MorphologyRules;
pub use tokenizer::{KeywordCandidate, KeywordCategory, KeywordToken, KeywordTokenizer};
