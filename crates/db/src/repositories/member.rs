//! Member repository for database operations.

use chrono::Utc;
use evenshare_shared::AppError;
use evenshare_shared::types::MemberId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{expenses, groups, members};

/// Error types for member operations.
#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    /// Member not found.
    #[error("Member not found: {0}")]
    NotFound(Uuid),

    /// Group not found.
    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<MemberError> for AppError {
    fn from(e: MemberError) -> Self {
        match e {
            MemberError::NotFound(_) | MemberError::GroupNotFound(_) => {
                Self::NotFound(e.to_string())
            }
            MemberError::Database(_) => Self::Database(e.to_string()),
        }
    }
}

/// Member repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a member to a group. The name must already be validated.
    ///
    /// # Errors
    ///
    /// Returns `MemberError::GroupNotFound` if the group does not exist.
    pub async fn create(&self, group_id: Uuid, name: &str) -> Result<members::Model, MemberError> {
        let txn = self.db.begin().await?;

        groups::Entity::find_by_id(group_id)
            .one(&txn)
            .await?
            .ok_or(MemberError::GroupNotFound(group_id))?;

        let now = Utc::now().into();
        let member = members::ActiveModel {
            id: Set(MemberId::new().into_inner()),
            group_id: Set(group_id),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(group_id = %group_id, member_id = %member.id, "Member added");
        Ok(member)
    }

    /// Deletes a member together with every expense they paid.
    ///
    /// # Errors
    ///
    /// Returns `MemberError::NotFound` if the member does not exist.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<(), MemberError> {
        let txn = self.db.begin().await?;

        let expenses_deleted = expenses::Entity::delete_many()
            .filter(expenses::Column::PayerId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let result = members::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(MemberError::NotFound(id));
        }

        txn.commit().await?;

        info!(member_id = %id, expenses_deleted, "Member deleted");
        Ok(())
    }
}
