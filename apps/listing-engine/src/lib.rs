//! Listing quality scoring and backend keyword budget packing.
//!
//! Two analyzers, both pure functions over strings:
//! - `quality`: grades listing copy (title, bullets, description, FAQs) on
//!   emotion, conversion and trust, returning a `ValidationReport`.
//! - `keywords`: packs a candidate keyword pool into a marketplace byte budget,
//!   returning a `PackedKeywordSet` and an `EfficiencyReport`.
//!
//! Configuration is an immutable `EngineConfig` loaded once at startup.

pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod keywords;
pub mod locale;
pub mod quality;
pub mod telemetry;

pub use config::{bootstrap, EngineConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use errors::EngineError;
pub use keywords::{
    EfficiencyReport, EfficiencyReporter, KeywordBudgetPacker, KeywordCandidate, KeywordCategory,
    KeywordLexicon, KeywordOptimizer, KeywordToken, KeywordTokenizer, PackedKeywordSet,
};
pub use locale::Locale;
pub use quality::{ContentSection, QualityScorer, ValidationReport};
