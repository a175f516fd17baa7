// Listing content quality scoring.
// Implements: lexical metric extraction, per-section rubrics, emotion/conversion/trust dimensions, grading.
// All scoring is synchronous and allocation-only; batch callers wrap it in spawn_blocking.

pub mod content;
pub mod dimensions;
pub mod extractor;
pub mod issues;
pub mod scorer;
pub mod sections;
pub mod terms;

pub use content::{ContentSection, SectionKind};
pub use dimensions::DimensionWeights;
pub use extractor::{Metric, MetricValue, Metrics, TextMetricExtractor};
pub use issues::{Issue, Severity};
pub use scorer::{QualityScorer, ValidationReport};
pub use sections::SectionScore;
pub use terms::{TermCategory, TermLists};
