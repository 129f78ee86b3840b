//! Expense repository for database operations.

use chrono::{NaiveDate, Utc};
use evenshare_core::balance::ExpenseInput;
use evenshare_shared::AppError;
use evenshare_shared::types::ExpenseId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
    sea_query::{NullOrdering, Order},
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{expenses, groups, members};
use crate::repositories::group::balance_expenses;

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(Uuid),

    /// Group not found.
    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),

    /// Payer does not exist.
    #[error("The selected payer is invalid: {0}")]
    PayerNotFound(Uuid),

    /// Payer exists but belongs to another group.
    #[error("Payer must be a member of the group.")]
    PayerNotInGroup,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ExpenseError> for AppError {
    fn from(e: ExpenseError) -> Self {
        match e {
            ExpenseError::NotFound(_) | ExpenseError::GroupNotFound(_) => {
                Self::NotFound(e.to_string())
            }
            ExpenseError::PayerNotFound(_) => Self::Validation(e.to_string()),
            ExpenseError::PayerNotInGroup => Self::BusinessRule(e.to_string()),
            ExpenseError::Database(_) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an expense. Fields must already be validated.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Owning group.
    pub group_id: Uuid,
    /// Member who paid.
    pub payer_id: Uuid,
    /// What the money was spent on.
    pub description: String,
    /// Amount in cents, at least 1.
    pub amount_cents: i64,
    /// Optional date of the expense.
    pub spent_at: Option<NaiveDate>,
}

/// An expense with its payer.
#[derive(Debug, Clone)]
pub struct ExpenseWithPayer {
    /// The expense.
    pub expense: expenses::Model,
    /// The member who paid, if still present.
    pub payer: Option<members::Model>,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every expense of a group, most recent `spent_at` first.
    ///
    /// Expenses without a date come last; ties fall back to creation time.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::GroupNotFound` if the group does not exist.
    pub async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<ExpenseWithPayer>, ExpenseError> {
        groups::Entity::find_by_id(group_id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::GroupNotFound(group_id))?;

        let rows = expenses::Entity::find()
            .filter(expenses::Column::GroupId.eq(group_id))
            .order_by_with_nulls(expenses::Column::SpentAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .find_also_related(members::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(expense, payer)| ExpenseWithPayer { expense, payer })
            .collect())
    }

    /// Records a new expense.
    ///
    /// The payer must exist and belong to the same group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound`, `PayerNotFound` or `PayerNotInGroup` when the
    /// references do not line up.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<ExpenseWithPayer, ExpenseError> {
        let txn = self.db.begin().await?;

        groups::Entity::find_by_id(input.group_id)
            .one(&txn)
            .await?
            .ok_or(ExpenseError::GroupNotFound(input.group_id))?;

        let payer = members::Entity::find_by_id(input.payer_id)
            .one(&txn)
            .await?
            .ok_or(ExpenseError::PayerNotFound(input.payer_id))?;

        if payer.group_id != input.group_id {
            return Err(ExpenseError::PayerNotInGroup);
        }

        let now = Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            group_id: Set(input.group_id),
            payer_id: Set(input.payer_id),
            description: Set(input.description),
            amount_cents: Set(input.amount_cents),
            spent_at: Set(input.spent_at),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            group_id = %expense.group_id,
            expense_id = %expense.id,
            payer_id = %expense.payer_id,
            amount_cents = expense.amount_cents,
            "Expense recorded"
        );

        Ok(ExpenseWithPayer {
            expense,
            payer: Some(payer),
        })
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if the expense does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), ExpenseError> {
        let result = expenses::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ExpenseError::NotFound(id));
        }

        info!(expense_id = %id, "Expense deleted");
        Ok(())
    }

    /// Loads payer and amount of every expense in a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_for_balance(&self, group_id: Uuid) -> Result<Vec<ExpenseInput>, ExpenseError> {
        Ok(balance_expenses(&self.db, group_id).await?)
    }
}
