//! Group repository for database operations.
//!
//! Also provides the balance snapshot: a group with its members in
//! creation order and every expense, read in one transaction.

use std::collections::HashMap;

use chrono::Utc;
use evenshare_core::balance::{ExpenseInput, GroupInfo, MemberInput};
use evenshare_shared::AppError;
use evenshare_shared::types::{GroupId, MemberId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{NullOrdering, Order},
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{expenses, groups, members};

/// Number of expenses shown on the group detail view.
pub const RECENT_EXPENSES_LIMIT: u64 = 50;

/// Error types for group operations.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    /// Group not found.
    #[error("Group not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<GroupError> for AppError {
    fn from(e: GroupError) -> Self {
        match e {
            GroupError::NotFound(_) => Self::NotFound(e.to_string()),
            GroupError::Database(_) => Self::Database(e.to_string()),
        }
    }
}

/// A group with the number of members and expenses it holds.
#[derive(Debug, Clone)]
pub struct GroupWithCounts {
    /// The group.
    pub group: groups::Model,
    /// Number of members.
    pub members_count: i64,
    /// Number of expenses.
    pub expenses_count: i64,
}

/// A group with its members and most recent expenses.
#[derive(Debug, Clone)]
pub struct GroupDetail {
    /// The group.
    pub group: groups::Model,
    /// Members in creation order.
    pub members: Vec<members::Model>,
    /// Most recent expenses with their payer, newest first.
    pub recent_expenses: Vec<(expenses::Model, Option<members::Model>)>,
}

/// Everything the balance engine needs for one group.
#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
    /// Group header.
    pub group: GroupInfo,
    /// Members in creation order (`created_at`, then `id`).
    pub members: Vec<MemberInput>,
    /// Every expense of the group.
    pub expenses: Vec<ExpenseInput>,
}

/// Group repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Creates a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all groups, newest first, with member and expense counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_counts(&self) -> Result<Vec<GroupWithCounts>, GroupError> {
        let groups = groups::Entity::find()
            .order_by_desc(groups::Column::CreatedAt)
            .order_by_desc(groups::Column::Id)
            .all(&self.db)
            .await?;

        let member_counts: HashMap<Uuid, i64> = members::Entity::find()
            .select_only()
            .column(members::Column::GroupId)
            .column_as(members::Column::Id.count(), "count")
            .group_by(members::Column::GroupId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        let expense_counts: HashMap<Uuid, i64> = expenses::Entity::find()
            .select_only()
            .column(expenses::Column::GroupId)
            .column_as(expenses::Column::Id.count(), "count")
            .group_by(expenses::Column::GroupId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(groups
            .into_iter()
            .map(|group| GroupWithCounts {
                members_count: member_counts.get(&group.id).copied().unwrap_or(0),
                expenses_count: expense_counts.get(&group.id).copied().unwrap_or(0),
                group,
            })
            .collect())
    }

    /// Creates a new group. The name must already be validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, name: &str) -> Result<groups::Model, GroupError> {
        let now = Utc::now().into();

        let group = groups::ActiveModel {
            id: Set(GroupId::new().into_inner()),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(group_id = %group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Gets a group with its members and its most recent expenses.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::NotFound` if the group does not exist.
    pub async fn get_detail(&self, id: Uuid) -> Result<GroupDetail, GroupError> {
        let group = groups::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(GroupError::NotFound(id))?;

        let members = ordered_members(&self.db, id).await?;

        let recent_expenses = expenses::Entity::find()
            .filter(expenses::Column::GroupId.eq(id))
            .order_by_with_nulls(expenses::Column::SpentAt, Order::Desc, NullOrdering::Last)
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .limit(RECENT_EXPENSES_LIMIT)
            .find_also_related(members::Entity)
            .all(&self.db)
            .await?;

        Ok(GroupDetail {
            group,
            members,
            recent_expenses,
        })
    }

    /// Deletes a group together with its members and expenses.
    ///
    /// Children are removed explicitly inside one transaction, so the result
    /// does not depend on the database enforcing foreign key cascades.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::NotFound` if the group does not exist.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<(), GroupError> {
        let txn = self.db.begin().await?;

        let expenses_deleted = expenses::Entity::delete_many()
            .filter(expenses::Column::GroupId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let members_deleted = members::Entity::delete_many()
            .filter(members::Column::GroupId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let result = groups::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(GroupError::NotFound(id));
        }

        txn.commit().await?;

        info!(
            group_id = %id,
            members_deleted,
            expenses_deleted,
            "Group deleted"
        );
        Ok(())
    }

    /// Loads the members of a group in creation order.
    ///
    /// Ordering is `created_at ASC, id ASC`. IDs are UUID v7, so the
    /// secondary key also follows creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_members(&self, group_id: Uuid) -> Result<Vec<members::Model>, GroupError> {
        Ok(ordered_members(&self.db, group_id).await?)
    }

    /// Loads a consistent snapshot of a group for balance calculation.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::NotFound` if the group does not exist.
    pub async fn load_balance_snapshot(&self, id: Uuid) -> Result<BalanceSnapshot, GroupError> {
        let txn = self.db.begin().await?;

        let group = groups::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(GroupError::NotFound(id))?;

        let members = ordered_members(&txn, id)
            .await?
            .into_iter()
            .map(|m| MemberInput {
                id: MemberId::from_uuid(m.id),
                name: m.name,
            })
            .collect();

        let expenses = balance_expenses(&txn, id).await?;

        txn.commit().await?;

        Ok(BalanceSnapshot {
            group: GroupInfo {
                id: GroupId::from_uuid(group.id),
                name: group.name,
            },
            members,
            expenses,
        })
    }
}

/// Members of a group ordered by `created_at`, then `id`.
pub(crate) async fn ordered_members<C: ConnectionTrait>(
    conn: &C,
    group_id: Uuid,
) -> Result<Vec<members::Model>, DbErr> {
    members::Entity::find()
        .filter(members::Column::GroupId.eq(group_id))
        .order_by_asc(members::Column::CreatedAt)
        .order_by_asc(members::Column::Id)
        .all(conn)
        .await
}

/// Payer and amount of every expense in a group.
pub(crate) async fn balance_expenses<C: ConnectionTrait>(
    conn: &C,
    group_id: Uuid,
) -> Result<Vec<ExpenseInput>, DbErr> {
    let rows = expenses::Entity::find()
        .select_only()
        .column(expenses::Column::PayerId)
        .column(expenses::Column::AmountCents)
        .filter(expenses::Column::GroupId.eq(group_id))
        .into_tuple::<(Uuid, i64)>()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(payer_id, amount_cents)| ExpenseInput {
            payer_id: MemberId::from_uuid(payer_id),
            amount_cents,
        })
        .collect())
}
