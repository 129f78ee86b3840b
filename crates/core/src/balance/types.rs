//! Balance calculation inputs and report types.
//!
//! Report field names are serialized as-is and form the JSON contract of the
//! balances endpoint.

use evenshare_shared::types::{Cents, GroupId, MemberId};
use serde::{Deserialize, Serialize};

/// Group header carried into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
}

/// A member as seen by the balance engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    /// Member ID.
    pub id: MemberId,
    /// Display name.
    pub name: String,
}

/// An expense as seen by the balance engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseInput {
    /// Member who paid.
    pub payer_id: MemberId,
    /// Amount paid, in cents.
    pub amount_cents: i64,
}

/// Balance report for one group, rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Group header.
    pub group: GroupInfo,
    /// Totals across the group.
    pub summary: BalanceSummary,
    /// One row per member, in member input order.
    pub per_member: Vec<MemberBalance>,
    /// Proposed transfers, in the order they were produced.
    pub settlements: Vec<SettlementTransfer>,
}

/// Group-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Sum of all expenses.
    pub total_cents: i64,
    /// `total_cents` in major units.
    pub total: String,
    /// Number of members.
    pub members: usize,
    /// Base share per member; the first `total % members` members pay one cent more.
    pub per_head_cents: i64,
    /// `per_head_cents` in major units.
    pub per_head: String,
}

impl BalanceSummary {
    pub(crate) fn new(total_cents: i64, members: usize, per_head_cents: i64) -> Self {
        Self {
            total_cents,
            total: Cents(total_cents).to_string(),
            members,
            per_head_cents,
            per_head: Cents(per_head_cents).to_string(),
        }
    }
}

/// Paid, share and balance for one member.
///
/// `balance_cents > 0` means the member should receive money,
/// `balance_cents < 0` means the member should pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    /// Member ID.
    pub member_id: MemberId,
    /// Display name.
    pub name: String,
    /// Amount this member paid.
    pub paid_cents: i64,
    /// `paid_cents` in major units.
    pub paid: String,
    /// This member's equal share of the total.
    pub share_cents: i64,
    /// `share_cents` in major units.
    pub share: String,
    /// `paid_cents - share_cents`.
    pub balance_cents: i64,
    /// `balance_cents` in major units.
    pub balance: String,
}

impl MemberBalance {
    pub(crate) fn new(member: &MemberInput, paid_cents: i64, share_cents: i64, balance_cents: i64) -> Self {
        Self {
            member_id: member.id,
            name: member.name.clone(),
            paid_cents,
            paid: Cents(paid_cents).to_string(),
            share_cents,
            share: Cents(share_cents).to_string(),
            balance_cents,
            balance: Cents(balance_cents).to_string(),
        }
    }
}

/// A single proposed transfer from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    /// Name of the paying member.
    pub from: String,
    /// Name of the receiving member.
    pub to: String,
    /// Amount to transfer.
    pub amount_cents: i64,
    /// `amount_cents` in major units.
    pub amount: String,
    /// ID of the paying member.
    pub from_member_id: MemberId,
    /// ID of the receiving member.
    pub to_member_id: MemberId,
}
