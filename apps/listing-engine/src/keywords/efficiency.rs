//! Efficiency Reporter — how well a backend keyword field uses its byte budget.
//!
//! # Tier rules (defaults)
//! - Usage ≥ 95%  → Excellent
//! - Usage ≥ 85%  → Good
//! - Otherwise    → Poor
//!
//! An empty field is `Empty`; a rendered field over its budget is `OverBudget`.

use serde::{Deserialize, Serialize};

use crate::keywords::packer::PackedKeywordSet;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyTier {
    Excellent,
    Good,
    Fair,
    Poor,
    /// Nothing packed, or a non-positive budget.
    Empty,
    /// Only reachable through `analyze_field`; packed sets never exceed budget.
    OverBudget,
}

/// Lower usage bound (percent) of a tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    pub min_percentage: f64,
    pub tier: EfficiencyTier,
}

pub fn default_tier_bands() -> Vec<TierBand> {
    vec![
        TierBand {
            min_percentage: 95.0,
            tier: EfficiencyTier::Excellent,
        },
        TierBand {
            min_percentage: 85.0,
            tier: EfficiencyTier::Good,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyReport {
    pub used_bytes: usize,
    pub budget_bytes: i64,
    pub usage_percentage: f64,
    pub token_count: usize,
    pub wasted_bytes: usize,
    pub efficiency_tier: EfficiencyTier,
}

// ────────────────────────────────────────────────────────────────────────────
// Reporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EfficiencyReporter {
    bands: Vec<TierBand>,
}

impl Default for EfficiencyReporter {
    fn default() -> Self {
        Self::new(default_tier_bands())
    }
}

impl EfficiencyReporter {
    /// Bands may be given in any order; the highest matching bound wins and
    /// usage below every band is `Poor`.
    pub fn new(mut bands: Vec<TierBand>) -> Self {
        bands.sort_by(|a, b| {
            b.min_percentage
                .partial_cmp(&a.min_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { bands }
    }

    pub fn analyze(&self, result: &PackedKeywordSet) -> EfficiencyReport {
        self.report(result.used_bytes, result.budget_bytes, result.len())
    }

    /// Scores an already-rendered backend field.
    pub fn analyze_field(&self, text: &str, separator: &str, budget_bytes: i64) -> EfficiencyReport {
        let token_count = if separator.is_empty() {
            usize::from(!text.trim().is_empty())
        } else {
            text.split(separator).filter(|t| !t.trim().is_empty()).count()
        };
        self.report(text.len(), budget_bytes, token_count)
    }

    fn report(&self, used_bytes: usize, budget_bytes: i64, token_count: usize) -> EfficiencyReport {
        let budget = usize::try_from(budget_bytes).unwrap_or(0);
        if budget == 0 || token_count == 0 {
            return EfficiencyReport {
                used_bytes,
                budget_bytes,
                usage_percentage: 0.0,
                token_count,
                wasted_bytes: budget,
                efficiency_tier: EfficiencyTier::Empty,
            };
        }

        let usage_percentage = used_bytes as f64 / budget as f64 * 100.0;
        let efficiency_tier = if used_bytes > budget {
            EfficiencyTier::OverBudget
        } else {
            self.tier_for(usage_percentage)
        };

        EfficiencyReport {
            used_bytes,
            budget_bytes,
            usage_percentage: (usage_percentage * 10.0).round() / 10.0,
            token_count,
            wasted_bytes: budget.saturating_sub(used_bytes),
            efficiency_tier,
        }
    }

    fn tier_for(&self, usage_percentage: f64) -> EfficiencyTier {
        self.bands
            .iter()
            .find(|b| usage_percentage >= b.min_percentage)
            .map(|b| b.tier)
            .unwrap_or(EfficiencyTier::Poor)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
