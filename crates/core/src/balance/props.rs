//! Property-based tests for balance calculation.
//!
//! - Conservation: shares sum to the total
//! - Zero-sum: balances sum to zero
//! - Remainder fairness: extra cents go to the first members only
//! - Settlement correctness: replaying transfers zeroes every balance
//! - Residual correction: unlisted payers never break the zero-sum

use std::collections::HashMap;

use evenshare_shared::types::{Cents, GroupId, MemberId};
use proptest::prelude::*;

use super::engine::BalanceEngine;
use super::types::{ExpenseInput, GroupInfo, MemberInput};

/// Strategy to generate a group snapshot: members plus expenses paid by them.
fn snapshot() -> impl Strategy<Value = (Vec<MemberInput>, Vec<ExpenseInput>)> {
    (2usize..12).prop_flat_map(|n| {
        let members: Vec<MemberInput> = (0..n)
            .map(|i| MemberInput {
                id: MemberId::new(),
                name: format!("member-{i}"),
            })
            .collect();
        let expenses = prop::collection::vec((0..n, 1i64..10_000_000), 0..30);
        (Just(members), expenses).prop_map(|(members, raw)| {
            let expenses = raw
                .into_iter()
                .map(|(payer, amount_cents)| ExpenseInput {
                    payer_id: members[payer].id,
                    amount_cents,
                })
                .collect();
            (members, expenses)
        })
    })
}

/// Strategy like `snapshot`, but some expenses are paid by IDs that are not
/// in the member list.
fn snapshot_with_unlisted_payers() -> impl Strategy<Value = (Vec<MemberInput>, Vec<ExpenseInput>)> {
    (2usize..12, 1usize..4).prop_flat_map(|(n, unlisted)| {
        let members: Vec<MemberInput> = (0..n)
            .map(|i| MemberInput {
                id: MemberId::new(),
                name: format!("member-{i}"),
            })
            .collect();
        let payers: Vec<MemberId> = members
            .iter()
            .map(|m| m.id)
            .chain((0..unlisted).map(|_| MemberId::new()))
            .collect();
        let expenses = prop::collection::vec((0..n + unlisted, 1i64..10_000_000), 1..30);
        (Just(members), expenses).prop_map(move |(members, raw)| {
            let expenses = raw
                .into_iter()
                .map(|(payer, amount_cents)| ExpenseInput {
                    payer_id: payers[payer],
                    amount_cents,
                })
                .collect();
            (members, expenses)
        })
    })
}

fn group() -> GroupInfo {
    GroupInfo {
        id: GroupId::new(),
        name: "props".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Shares always add up to the total exactly.
    #[test]
    fn prop_shares_sum_to_total((members, expenses) in snapshot()) {
        let report = BalanceEngine::calculate(&group(), &members, &expenses);
        let shares: i64 = report.per_member.iter().map(|m| m.share_cents).sum();
        prop_assert_eq!(shares, report.summary.total_cents);
    }

    /// Balances always sum to zero for two or more members.
    #[test]
    fn prop_balances_sum_to_zero((members, expenses) in snapshot()) {
        let report = BalanceEngine::calculate(&group(), &members, &expenses);
        let sum: i64 = report.per_member.iter().map(|m| m.balance_cents).sum();
        prop_assert_eq!(sum, 0);
    }

    /// Expenses from unlisted payers still count toward the total, and the
    /// last member absorbs the drift so balances sum to zero.
    #[test]
    fn prop_unlisted_payers_keep_zero_sum((members, expenses) in snapshot_with_unlisted_payers()) {
        let report = BalanceEngine::calculate(&group(), &members, &expenses);

        let total: i64 = expenses.iter().map(|e| e.amount_cents).sum();
        prop_assert_eq!(report.summary.total_cents, total);

        let shares: i64 = report.per_member.iter().map(|m| m.share_cents).sum();
        prop_assert_eq!(shares, total);

        let balances: i64 = report.per_member.iter().map(|m| m.balance_cents).sum();
        prop_assert_eq!(balances, 0);

        // Only the last row's balance departs from paid - share
        let (last, rest) = report.per_member.split_last().unwrap();
        for row in rest {
            prop_assert_eq!(row.balance_cents, row.paid_cents - row.share_cents);
        }
        let unlisted_paid: i64 = expenses
            .iter()
            .filter(|e| !members.iter().any(|m| m.id == e.payer_id))
            .map(|e| e.amount_cents)
            .sum();
        prop_assert_eq!(last.balance_cents, last.paid_cents - last.share_cents + unlisted_paid);

        let owed: i64 = report.per_member.iter().map(|m| m.balance_cents.max(0)).sum();
        let transferred: i64 = report.settlements.iter().map(|t| t.amount_cents).sum();
        prop_assert_eq!(owed, transferred);
    }

    /// Exactly the first `total % n` members receive the extra cent.
    #[test]
    fn prop_remainder_goes_to_first_members((members, expenses) in snapshot()) {
        let report = BalanceEngine::calculate(&group(), &members, &expenses);
        let n = i64::try_from(members.len()).unwrap();
        let total = report.summary.total_cents;
        let base = total / n;
        let remainder = usize::try_from(total % n).unwrap();

        prop_assert_eq!(report.summary.per_head_cents, base);
        for (i, row) in report.per_member.iter().enumerate() {
            let expected = if i < remainder { base + 1 } else { base };
            prop_assert_eq!(row.share_cents, expected);
        }
    }

    /// Replaying the settlement plan drives every balance to zero.
    #[test]
    fn prop_settlements_clear_all_balances((members, expenses) in snapshot()) {
        let report = BalanceEngine::calculate(&group(), &members, &expenses);

        let mut balances: HashMap<MemberId, i64> = report
            .per_member
            .iter()
            .map(|m| (m.member_id, m.balance_cents))
            .collect();
        for t in &report.settlements {
            prop_assert!(t.amount_cents > 0);
            *balances.get_mut(&t.from_member_id).unwrap() += t.amount_cents;
            *balances.get_mut(&t.to_member_id).unwrap() -= t.amount_cents;
        }
        prop_assert!(balances.values().all(|b| *b == 0));

        let owed: i64 = report
            .per_member
            .iter()
            .map(|m| m.balance_cents.max(0))
            .sum();
        let transferred: i64 = report.settlements.iter().map(|t| t.amount_cents).sum();
        prop_assert_eq!(owed, transferred);
        prop_assert!(report.settlements.len() < members.len());
    }

    /// Paid amounts match the expenses each member paid.
    #[test]
    fn prop_paid_matches_expenses((members, expenses) in snapshot()) {
        let report = BalanceEngine::calculate(&group(), &members, &expenses);
        for row in &report.per_member {
            let expected: i64 = expenses
                .iter()
                .filter(|e| e.payer_id == row.member_id)
                .map(|e| e.amount_cents)
                .sum();
            prop_assert_eq!(row.paid_cents, expected);
        }
    }

    /// A lone member never gets a split, whatever they paid.
    #[test]
    fn prop_single_member_is_zero(amounts in prop::collection::vec(1i64..1_000_000, 0..10)) {
        let solo = MemberInput { id: MemberId::new(), name: "solo".to_string() };
        let expenses: Vec<ExpenseInput> = amounts
            .into_iter()
            .map(|amount_cents| ExpenseInput { payer_id: solo.id, amount_cents })
            .collect();

        let report = BalanceEngine::calculate(&group(), &[solo], &expenses);

        prop_assert_eq!(report.summary.total_cents, 0);
        prop_assert_eq!(report.per_member[0].balance_cents, 0);
        prop_assert!(report.settlements.is_empty());
    }

    /// Formatted strings always carry two decimals and the right sign.
    #[test]
    fn prop_format_has_two_decimals(cents in any::<i64>()) {
        let s = Cents(cents).to_string();
        let (whole, frac) = s.rsplit_once('.').unwrap();
        prop_assert_eq!(frac.len(), 2);
        prop_assert_eq!(whole.starts_with('-'), cents < 0);
        let digits = s.replace(['-', '.'], "");
        prop_assert_eq!(digits.parse::<u64>().unwrap(), cents.unsigned_abs());
    }
}
