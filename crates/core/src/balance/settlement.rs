//! Greedy settlement planning.
//!
//! Matches debtors to creditors in member order with two cursors. This is
//! a simple feasible plan with at most `n - 1` transfers; it does not
//! search for the minimal number of transactions.

use evenshare_shared::types::Cents;

use super::types::{MemberBalance, SettlementTransfer};

/// A member with an outstanding amount still to pay or receive.
struct Outstanding<'a> {
    member: &'a MemberBalance,
    remaining: i64,
}

/// Produces transfers that bring every balance in `per_member` to zero.
///
/// Creditors (`balance_cents > 0`) and debtors (`balance_cents < 0`) keep
/// their relative order from `per_member`. Each step moves
/// `min(debtor owes, creditor is owed)` and advances whichever side is
/// exhausted. Stops as soon as either side runs out.
#[must_use]
pub fn greedy_settlements(per_member: &[MemberBalance]) -> Vec<SettlementTransfer> {
    let mut creditors: Vec<Outstanding<'_>> = Vec::new();
    let mut debtors: Vec<Outstanding<'_>> = Vec::new();

    for member in per_member {
        if member.balance_cents > 0 {
            creditors.push(Outstanding {
                member,
                remaining: member.balance_cents,
            });
        } else if member.balance_cents < 0 {
            debtors.push(Outstanding {
                member,
                remaining: member.balance_cents.saturating_neg(),
            });
        }
    }

    let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];
        let amount = debtor.remaining.min(creditor.remaining);

        transfers.push(SettlementTransfer {
            from: debtor.member.name.clone(),
            to: creditor.member.name.clone(),
            amount_cents: amount,
            amount: Cents(amount).to_string(),
            from_member_id: debtor.member.member_id,
            to_member_id: creditor.member.member_id,
        });

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining == 0 {
            i += 1;
        }
        if creditor.remaining == 0 {
            j += 1;
        }
    }

    transfers
}
