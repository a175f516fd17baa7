//! Keyword Budget Packer — greedy selection of tokens under a hard byte ceiling.
//!
//! # Packing rules
//! - Total bytes, separators included, never exceed the budget
//! - Tokens are never split; a token larger than the whole budget is never packed
//! - Same input, same policy → same output
//! - Supplemental locale tokens are considered only after every caller token

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::keywords::tokenizer::{KeywordCategory, KeywordToken};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Ordering and redundancy policy for the packer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingPolicy {
    /// Categories in descending priority. Unlisted categories pack last.
    pub category_order: Vec<KeywordCategory>,
    /// Skip a token whose every word is already present in the packed set.
    pub skip_covered_tokens: bool,
}

impl Default for PackingPolicy {
    fn default() -> Self {
        Self {
            category_order: vec![
                KeywordCategory::Conquest,
                KeywordCategory::Primary,
                KeywordCategory::Seasonal,
                KeywordCategory::Generic,
            ],
            skip_covered_tokens: true,
        }
    }
}

impl PackingPolicy {
    fn rank(&self, category: KeywordCategory) -> usize {
        self.category_order
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.category_order.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Larger than the whole budget on its own.
    Oversized,
    /// Would not fit in the space left.
    OverBudget,
    Duplicate,
    /// Every word already covered by packed tokens.
    Redundant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedToken {
    pub text: String,
    pub reason: SkipReason,
}

/// Packer output: the packed tokens in packing order plus the bookkeeping
/// needed to explain what was left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedKeywordSet {
    pub tokens: Vec<KeywordToken>,
    pub separator: String,
    pub budget_bytes: i64,
    pub used_bytes: usize,
    pub skipped: Vec<SkippedToken>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PackedKeywordSet {
    fn empty(budget_bytes: i64, separator: &str) -> Self {
        Self {
            tokens: Vec::new(),
            separator: separator.to_string(),
            budget_bytes,
            used_bytes: 0,
            skipped: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The backend field value: tokens joined by the separator.
    pub fn render(&self) -> String {
        self.texts().join(&self.separator)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Byte total of `tokens` joined by a separator of `separator_bytes`.
fn joined_bytes(tokens: &[KeywordToken], separator_bytes: usize) -> usize {
    let content: usize = tokens.iter().map(|t| t.byte_length).sum();
    content + separator_bytes * tokens.len().saturating_sub(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Packer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct KeywordBudgetPacker {
    policy: PackingPolicy,
}

impl KeywordBudgetPacker {
    pub fn new(policy: PackingPolicy) -> Self {
        Self { policy }
    }

    /// Packs `tokens` into `budget_bytes`.
    ///
    /// Algorithm:
    /// 1. Order by (caller before supplemental, category rank, byte length
    ///    ascending, input position)
    /// 2. Walk the ordered list once, appending every token that fits; the
    ///    separator is only counted between tokens
    /// 3. Record a reason for every token left out
    ///
    /// A non-positive budget or an empty token list yields an empty set.
    pub fn pack(&self, tokens: &[KeywordToken], budget_bytes: i64, separator: &str) -> PackedKeywordSet {
        let mut result = PackedKeywordSet::empty(budget_bytes, separator);
        if budget_bytes <= 0 {
            if !tokens.is_empty() {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidInput,
                    format!("Byte budget {budget_bytes} is not positive; nothing packed"),
                ));
            }
            return result;
        }
        if tokens.is_empty() {
            return result;
        }

        let budget = usize::try_from(budget_bytes).unwrap_or(usize::MAX);
        let separator_bytes = separator.len();

        let mut order: Vec<usize> = (0..tokens.len()).collect();
        order.sort_by_key(|&i| {
            let token = &tokens[i];
            (
                token.supplemental,
                self.policy.rank(token.category),
                token.byte_length,
                i,
            )
        });

        let mut packed_texts: HashSet<&str> = HashSet::new();
        let mut covered_words: HashSet<&str> = HashSet::new();

        for i in order {
            let token = &tokens[i];
            let reason = if packed_texts.contains(token.text.as_str()) {
                Some(SkipReason::Duplicate)
            } else if token.byte_length > budget {
                Some(SkipReason::Oversized)
            } else if self.policy.skip_covered_tokens
                && !covered_words.is_empty()
                && token.text.split(' ').all(|w| covered_words.contains(w))
            {
                Some(SkipReason::Redundant)
            } else {
                let cost = token.byte_length
                    + if result.tokens.is_empty() {
                        0
                    } else {
                        separator_bytes
                    };
                (result.used_bytes + cost > budget).then_some(SkipReason::OverBudget)
            };

            match reason {
                Some(reason) => result.skipped.push(SkippedToken {
                    text: token.text.clone(),
                    reason,
                }),
                None => {
                    let separator_cost = if result.tokens.is_empty() {
                        0
                    } else {
                        separator_bytes
                    };
                    result.used_bytes += token.byte_length + separator_cost;
                    packed_texts.insert(token.text.as_str());
                    covered_words.extend(token.text.split(' '));
                    result.tokens.push(token.clone());
                }
            }
        }

        enforce_budget(&mut result, budget, separator_bytes);

        debug!(
            "Packed {} of {} tokens into {}/{} bytes",
            result.tokens.len(),
            tokens.len(),
            result.used_bytes,
            budget
        );
        result
    }
}

/// Final guard: drops trailing tokens until the rendered size fits.
fn enforce_budget(result: &mut PackedKeywordSet, budget: usize, separator_bytes: usize) {
    let mut total = joined_bytes(&result.tokens, separator_bytes);
    if total <= budget {
        result.used_bytes = total;
        return;
    }

    warn!("Packed keywords exceed budget ({total} > {budget}); dropping trailing tokens");
    result.diagnostics.push(Diagnostic::new(
        DiagnosticKind::BudgetExceededAttempt,
        format!("Packed size {total} exceeded budget {budget}; trailing tokens dropped"),
    ));
    while total > budget {
        let Some(dropped) = result.tokens.pop() else {
            break;
        };
        result.skipped.push(SkippedToken {
            text: dropped.text,
            reason: SkipReason::OverBudget,
        });
        total = joined_bytes(&result.tokens, separator_bytes);
    }
    result.used_bytes = total;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens(texts: &[&str]) -> Vec<KeywordToken> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| KeywordToken::new(*t, KeywordCategory::Primary, i))
            .collect()
    }

    fn packer() -> KeywordBudgetPacker {
        KeywordBudgetPacker::default()
    }

    #[test]
    fn test_shortest_first_fills_budget_exactly() {
        let result = packer().pack(&tokens(&["ab", "abcdef", "xy"]), 6, ", ");
        assert_eq!(result.render(), "ab, xy");
        assert_eq!(result.used_bytes, 6);
        assert_eq!(
            result.skipped,
            vec![SkippedToken {
                text: "abcdef".to_string(),
                reason: SkipReason::OverBudget
            }]
        );
    }

    #[test]
    fn test_separator_not_counted_for_single_token() {
        let result = packer().pack(&tokens(&["abcdef"]), 6, ", ");
        assert_eq!(result.texts(), vec!["abcdef"]);
        assert_eq!(result.used_bytes, 6);
    }

    #[test]
    fn test_oversized_token_never_included() {
        let result = packer().pack(&tokens(&["this token is far too long", "ok"]), 10, ", ");
        assert_eq!(result.texts(), vec!["ok"]);
        assert!(result
            .skipped
            .iter()
            .any(|s| s.reason == SkipReason::Oversized));
    }

    #[test]
    fn test_keeps_scanning_after_a_skip() {
        let mut pool = tokens(&["bbbbbb", "aaaa", "c"]);
        pool[0].category = KeywordCategory::Conquest;
        pool[2].category = KeywordCategory::Seasonal;
        // "aaaa" needs 6 more bytes and is skipped; "c" needs 3 and still fits
        let result = packer().pack(&pool, 9, ", ");
        assert_eq!(result.texts(), vec!["bbbbbb", "c"]);
        assert_eq!(result.used_bytes, 9);
    }

    #[test]
    fn test_non_positive_budget_yields_empty_set() {
        for budget in [0, -5] {
            let result = packer().pack(&tokens(&["ab"]), budget, ", ");
            assert!(result.is_empty());
            assert_eq!(result.used_bytes, 0);
            assert_eq!(result.diagnostics.len(), 1);
        }
        assert!(packer().pack(&[], 249, ", ").diagnostics.is_empty());
    }

    #[test]
    fn test_duplicates_skipped() {
        let result = packer().pack(&tokens(&["knife", "knife"]), 100, ", ");
        assert_eq!(result.texts(), vec!["knife"]);
        assert_eq!(result.skipped[0].reason, SkipReason::Duplicate);
    }

    #[test]
    fn test_category_priority_beats_length() {
        let mut pool = tokens(&["bamboo board", "gift"]);
        pool[0].category = KeywordCategory::Conquest;
        pool[1].category = KeywordCategory::Seasonal;
        let result = packer().pack(&pool, 12, ", ");
        assert_eq!(result.texts(), vec!["bamboo board"]);
    }

    #[test]
    fn test_custom_policy_reorders_categories() {
        let mut pool = tokens(&["bamboo board", "gift"]);
        pool[0].category = KeywordCategory::Conquest;
        pool[1].category = KeywordCategory::Seasonal;
        let policy = PackingPolicy {
            category_order: vec![KeywordCategory::Seasonal, KeywordCategory::Conquest],
            skip_covered_tokens: true,
        };
        let result = KeywordBudgetPacker::new(policy).pack(&pool, 12, ", ");
        assert_eq!(result.texts(), vec!["gift"]);
    }

    #[test]
    fn test_supplemental_tokens_pack_after_caller_tokens() {
        let mut pool = tokens(&["bois", "couteau de chef"]);
        pool[0].category = KeywordCategory::Conquest;
        pool[0].supplemental = true;
        // Only one fits: the caller's keyword wins despite its lower category
        let result = packer().pack(&pool, 16, ", ");
        assert_eq!(result.texts(), vec!["couteau de chef"]);
        let result = packer().pack(&pool, 21, ", ");
        assert_eq!(result.render(), "couteau de chef, bois");
    }

    #[test]
    fn test_covered_tokens_skipped_as_redundant() {
        let result = packer().pack(&tokens(&["chef", "knife", "chef knife"]), 100, ", ");
        assert_eq!(result.texts(), vec!["chef", "knife"]);
        assert_eq!(result.skipped[0].reason, SkipReason::Redundant);

        let policy = PackingPolicy {
            skip_covered_tokens: false,
            ..PackingPolicy::default()
        };
        let all = KeywordBudgetPacker::new(policy).pack(&tokens(&["chef", "knife", "chef knife"]), 100, ", ");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_multibyte_tokens_measured_in_bytes() {
        let pool = tokens(&["größe", "groesse"]);
        // "größe" is 7 bytes, "groesse" 7 bytes: both can't fit with separator in 15
        let result = packer().pack(&pool, 15, ", ");
        assert_eq!(result.len(), 1);
        let result = packer().pack(&pool, 16, ", ");
        assert_eq!(result.render().len(), 16);
    }

    #[test]
    fn test_guard_drops_trailing_tokens() {
        let mut result = PackedKeywordSet::empty(5, ", ");
        result.tokens = tokens(&["abc", "def"]);
        enforce_budget(&mut result, 5, 2);
        assert_eq!(result.texts(), vec!["abc"]);
        assert_eq!(result.used_bytes, 3);
        assert_eq!(
            result.diagnostics[0].kind,
            DiagnosticKind::BudgetExceededAttempt
        );
    }

    fn token_pool() -> impl Strategy<Value = Vec<KeywordToken>> {
        prop::collection::vec(("[a-zäöü ]{1,20}", 0usize..4), 0..40).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (text, cat))| {
                    let category = [
                        KeywordCategory::Conquest,
                        KeywordCategory::Primary,
                        KeywordCategory::Seasonal,
                        KeywordCategory::Generic,
                    ][cat];
                    KeywordToken::new(text, category, i)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_budget(pool in token_pool(), budget in -10i64..300) {
            let result = packer().pack(&pool, budget, ", ");
            let rendered = result.render();
            prop_assert!(rendered.len() as i64 <= budget.max(0));
            prop_assert_eq!(rendered.len(), result.used_bytes);
        }

        #[test]
        fn prop_no_duplicates_and_no_oversized(pool in token_pool(), budget in 1i64..120) {
            let result = packer().pack(&pool, budget, ", ");
            let mut seen = HashSet::new();
            for token in &result.tokens {
                prop_assert!(seen.insert(token.text.clone()), "duplicate {}", token.text);
                prop_assert!(token.byte_length as i64 <= budget);
            }
        }

        #[test]
        fn prop_packing_is_deterministic(pool in token_pool(), budget in 0i64..200) {
            let first = packer().pack(&pool, budget, ", ");
            let second = packer().pack(&pool, budget, ", ");
            prop_assert_eq!(first, second);
        }
    }
}
