//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod expense;
pub mod group;
pub mod member;

pub use expense::{CreateExpenseInput, ExpenseError, ExpenseRepository, ExpenseWithPayer};
pub use group::{BalanceSnapshot, GroupDetail, GroupError, GroupRepository, GroupWithCounts};
pub use member::{MemberError, MemberRepository};
