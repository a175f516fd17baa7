use serde::{Deserialize, Serialize};

/// Category of a non-fatal anomaly observed while scoring or packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Empty or malformed value where one was expected.
    InvalidInput,
    /// Section name the scorer does not recognise; its text is ignored.
    UnknownSection,
    /// Locale term list, ruleset or marketplace budget absent; a fallback was used.
    ConfigurationMissing,
    /// The packer caught an over-budget result and dropped tokens to repair it.
    BudgetExceededAttempt,
}

/// Structured record of an anomaly, returned inside reports instead of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_section(name: &str) -> Self {
        Self::new(
            DiagnosticKind::UnknownSection,
            format!("Unknown section '{name}' ignored"),
        )
    }

    pub fn configuration_missing(what: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::ConfigurationMissing, what)
    }
}
