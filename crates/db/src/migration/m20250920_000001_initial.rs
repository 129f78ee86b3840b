//! Initial database migration.
//!
//! Creates the groups, members and expenses tables. Child rows reference
//! their parent with `ON DELETE CASCADE`; repositories also delete children
//! explicitly inside a transaction.

use sea_orm_migration::prelude::*;

/// Upper bound for `expenses.amount_cents` (`i32::MAX`).
const MAX_AMOUNT_CENTS: i64 = 2_147_483_647;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Groups::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Groups::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Groups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Groups::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Members::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Members::GroupId).uuid().not_null())
                    .col(ColumnDef::new(Members::Name).string_len(80).not_null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Members::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_group")
                            .from(Members::Table, Members::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::GroupId).uuid().not_null())
                    .col(ColumnDef::new(Expenses::PayerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Expenses::Description)
                            .string_len(140)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::SpentAt).date().null())
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(
                        Expr::col(Expenses::AmountCents)
                            .gt(0)
                            .and(Expr::col(Expenses::AmountCents).lte(MAX_AMOUNT_CENTS)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_group")
                            .from(Expenses::Table, Expenses::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_payer")
                            .from(Expenses::Table, Expenses::PayerId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Balance snapshots read members in creation order
        manager
            .create_index(
                Index::create()
                    .name("idx_members_group_created")
                    .table(Members::Table)
                    .col(Members::GroupId)
                    .col(Members::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_group_spent")
                    .table(Expenses::Table)
                    .col(Expenses::GroupId)
                    .col(Expenses::SpentAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_payer")
                    .table(Expenses::Table)
                    .col(Expenses::PayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Groups {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    GroupId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    GroupId,
    PayerId,
    Description,
    AmountCents,
    SpentAt,
    CreatedAt,
    UpdatedAt,
}
