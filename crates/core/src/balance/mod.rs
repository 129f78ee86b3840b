//! Group balance calculation.
//!
//! Splits a group's expenses equally across its members, derives each
//! member's net balance, and proposes transfers that settle the group.
//! All amounts are integer cents.

pub mod engine;
pub mod settlement;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::BalanceEngine;
pub use settlement::greedy_settlements;
pub use types::{
    BalanceReport, BalanceSummary, ExpenseInput, GroupInfo, MemberBalance, MemberInput,
    SettlementTransfer,
};
