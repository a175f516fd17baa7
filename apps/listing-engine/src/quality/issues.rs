use serde::{Deserialize, Serialize};

use crate::quality::content::SectionKind;
use crate::quality::sections::SectionScore;

/// Major issues beyond this many are left out of the action items.
const MAX_MAJOR_ACTIONS: usize = 3;
/// Number of weakest sections whose first improvement becomes an action item.
const WEAKEST_SECTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Major => "MAJOR",
            Severity::Minor => "MINOR",
        }
    }
}

/// A single finding with a concrete fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub section: SectionKind,
    pub message: String,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Points left on the table by this finding.
    pub score_impact: f64,
}

impl Issue {
    pub fn new(
        severity: Severity,
        section: SectionKind,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            section,
            message: message.into(),
            suggestion: suggestion.into(),
            example: None,
            score_impact: 0.0,
        }
    }

    pub fn with_example(mut self, example: Option<&str>) -> Self {
        self.example = example.map(str::to_string);
        self
    }

    pub fn with_impact(mut self, impact: f64) -> Self {
        self.score_impact = impact;
        self
    }
}

/// Orders issues severity-first, then by section order.
///
/// The sort is stable, so issues of equal rank keep their emission order.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by_key(|i| (i.severity, i.section));
}

/// Builds the prioritized to-do list shown alongside a report.
///
/// All critical issues, the first few major ones, then the first improvement
/// of the weakest sections. `issues` must already be sorted.
pub fn build_action_items(
    issues: &[Issue],
    section_scores: &[SectionScore],
    limit: usize,
) -> Vec<String> {
    let mut items: Vec<String> = issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .map(|i| format!("{}: {} - {}", i.severity.label(), i.message, i.suggestion))
        .collect();

    items.extend(
        issues
            .iter()
            .filter(|i| i.severity == Severity::Major)
            .take(MAX_MAJOR_ACTIONS)
            .map(|i| format!("{}: {} - {}", i.severity.label(), i.message, i.suggestion)),
    );

    let mut weakest: Vec<&SectionScore> = section_scores.iter().collect();
    weakest.sort_by(|a, b| {
        a.ratio()
            .partial_cmp(&b.ratio())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for section in weakest.into_iter().take(WEAKEST_SECTIONS) {
        if let Some(first) = section.improvements.first() {
            items.push(format!(
                "{}: {}",
                section.section.label().to_uppercase(),
                first
            ));
        }
    }

    items.truncate(limit);
    items
}
