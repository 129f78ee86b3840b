//! Equal-split balance engine.

use std::collections::HashMap;

use evenshare_shared::types::MemberId;
use tracing::warn;

use super::settlement::greedy_settlements;
use super::types::{BalanceReport, BalanceSummary, ExpenseInput, GroupInfo, MemberBalance, MemberInput};

/// Computes shares, balances and settlements for a group snapshot.
///
/// Member order is part of the contract: remainder cents go to the first
/// members and the residual correction lands on the last one, so callers
/// must pass members in a deterministic order (the repository uses
/// creation time ascending, then ID).
pub struct BalanceEngine;

impl BalanceEngine {
    /// Builds the balance report for `members` and `expenses`.
    ///
    /// With zero or one member nothing is split: every amount in the report
    /// is zero and there are no settlements, even if expenses exist.
    ///
    /// Expenses paid by someone not in `members` count toward the total but
    /// toward nobody's paid amount; the resulting drift is absorbed by the
    /// last member's balance so balances still sum to zero.
    #[must_use]
    pub fn calculate(
        group: &GroupInfo,
        members: &[MemberInput],
        expenses: &[ExpenseInput],
    ) -> BalanceReport {
        let n = members.len();

        if n <= 1 {
            return BalanceReport {
                group: group.clone(),
                summary: BalanceSummary::new(0, n, 0),
                per_member: members
                    .iter()
                    .map(|m| MemberBalance::new(m, 0, 0, 0))
                    .collect(),
                settlements: Vec::new(),
            };
        }

        // Saturate rather than wrap on inputs past the validated amount range
        let total = expenses
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.amount_cents));
        let shares = Self::split_equally(total, n);
        // the last share never carries a remainder cent
        let per_head = shares.last().copied().unwrap_or(0);

        let mut paid_by_member: HashMap<MemberId, i64> =
            members.iter().map(|m| (m.id, 0)).collect();
        for expense in expenses {
            if let Some(paid) = paid_by_member.get_mut(&expense.payer_id) {
                *paid = paid.saturating_add(expense.amount_cents);
            }
        }

        let mut rows: Vec<(i64, i64, i64)> = members
            .iter()
            .zip(&shares)
            .map(|(m, &share)| {
                let paid = paid_by_member.get(&m.id).copied().unwrap_or(0);
                (paid, share, paid.saturating_sub(share))
            })
            .collect();

        let residual: i128 = rows.iter().map(|(_, _, balance)| i128::from(*balance)).sum();
        if residual != 0 {
            warn!(
                group_id = %group.id,
                residual_cents = residual,
                "Balances did not sum to zero; adjusting last member"
            );
            if let Some((_, _, balance)) = rows.last_mut() {
                let corrected = i128::from(*balance) - residual;
                *balance = i64::try_from(corrected).unwrap_or(if corrected < 0 {
                    i64::MIN
                } else {
                    i64::MAX
                });
            }
        }

        let per_member: Vec<MemberBalance> = members
            .iter()
            .zip(rows)
            .map(|(m, (paid, share, balance))| MemberBalance::new(m, paid, share, balance))
            .collect();

        let settlements = greedy_settlements(&per_member);

        BalanceReport {
            group: group.clone(),
            summary: BalanceSummary::new(total, n, per_head),
            per_member,
            settlements,
        }
    }

    /// Splits `total` cents into `count` shares that sum exactly to `total`.
    ///
    /// Every share is `floor(total / count)`; the first `total mod count`
    /// shares get one extra cent. Returns an empty vector for `count == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use evenshare_core::balance::BalanceEngine;
    ///
    /// assert_eq!(BalanceEngine::split_equally(100, 3), vec![34, 33, 33]);
    /// ```
    #[must_use]
    pub fn split_equally(total: i64, count: usize) -> Vec<i64> {
        let Ok(divisor) = i64::try_from(count) else {
            return Vec::new();
        };
        if divisor == 0 {
            return Vec::new();
        }

        let base = total.div_euclid(divisor);
        // 0 <= remainder < count, so the cast back is lossless
        let remainder = usize::try_from(total.rem_euclid(divisor)).unwrap_or(0);

        (0..count)
            .map(|i| if i < remainder { base + 1 } else { base })
            .collect()
    }
}
