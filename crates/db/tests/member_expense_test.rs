//! Integration tests for the Member and Expense repositories.

use evenshare_db::{
    ExpenseRepository, GroupRepository, MemberRepository,
    migration::{Migrator, MigratorTrait},
    repositories::{CreateExpenseInput, ExpenseError, MemberError},
};
use evenshare_shared::AppError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Open a fresh in-memory database with the schema applied.
async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn expense(group_id: Uuid, payer_id: Uuid, amount_cents: i64) -> CreateExpenseInput {
    CreateExpenseInput {
        group_id,
        payer_id,
        description: "Groceries".to_string(),
        amount_cents,
        spent_at: None,
    }
}

#[tokio::test]
async fn test_member_requires_existing_group() {
    let db = setup_db().await;
    let repo = MemberRepository::new(db);

    let missing = Uuid::new_v4();
    let result = repo.create(missing, "Alice").await;

    assert!(matches!(result, Err(MemberError::GroupNotFound(id)) if id == missing));
}

#[tokio::test]
async fn test_delete_member_removes_their_expenses() {
    let db = setup_db().await;
    let groups = GroupRepository::new(db.clone());
    let group = groups.create("Roommates").await.unwrap();
    let members = MemberRepository::new(db.clone());
    let expenses = ExpenseRepository::new(db.clone());

    let dana = members.create(group.id, "Dana").await.unwrap();
    let eli = members.create(group.id, "Eli").await.unwrap();
    expenses.create(expense(group.id, dana.id, 2240)).await.unwrap();
    expenses.create(expense(group.id, eli.id, 5880)).await.unwrap();

    members.delete_cascade(dana.id).await.expect("Failed to delete member");

    let remaining_members = groups.load_members(group.id).await.unwrap();
    assert_eq!(remaining_members.len(), 1);
    assert_eq!(remaining_members[0].id, eli.id);
    let remaining = expenses.load_for_balance(group.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].payer_id.into_inner(), eli.id);
    assert_eq!(remaining[0].amount_cents, 5880);
}

#[tokio::test]
async fn test_delete_missing_member() {
    let db = setup_db().await;
    let repo = MemberRepository::new(db);

    let result = repo.delete_cascade(Uuid::new_v4()).await;

    assert!(matches!(result, Err(MemberError::NotFound(_))));
}

#[tokio::test]
async fn test_create_expense_returns_payer() {
    let db = setup_db().await;
    let group = GroupRepository::new(db.clone()).create("Trip").await.unwrap();
    let alice = MemberRepository::new(db.clone())
        .create(group.id, "Alice")
        .await
        .unwrap();

    let created = ExpenseRepository::new(db)
        .create(expense(group.id, alice.id, 7420))
        .await
        .expect("Failed to create expense");

    assert_eq!(created.expense.amount_cents, 7420);
    assert_eq!(created.expense.group_id, group.id);
    assert_eq!(created.payer.map(|p| p.name), Some("Alice".to_string()));
}

#[tokio::test]
async fn test_expense_payer_must_belong_to_group() {
    let db = setup_db().await;
    let groups = GroupRepository::new(db.clone());
    let members = MemberRepository::new(db.clone());
    let repo = ExpenseRepository::new(db);

    let trip = groups.create("Trip").await.unwrap();
    let home = groups.create("Home").await.unwrap();
    let outsider = members.create(home.id, "Outsider").await.unwrap();

    let result = repo.create(expense(trip.id, outsider.id, 100)).await;
    assert!(matches!(result, Err(ExpenseError::PayerNotInGroup)));

    let app_error: AppError = result.unwrap_err().into();
    assert_eq!(app_error.status_code(), 422);
    assert_eq!(app_error.error_code(), "business_rule_violation");
    assert_eq!(app_error.to_string(), "Business rule violation: Payer must be a member of the group.");
}

#[tokio::test]
async fn test_expense_unknown_payer_or_group() {
    let db = setup_db().await;
    let group = GroupRepository::new(db.clone()).create("Trip").await.unwrap();
    let repo = ExpenseRepository::new(db);

    let unknown_payer = repo.create(expense(group.id, Uuid::new_v4(), 100)).await;
    assert!(matches!(unknown_payer, Err(ExpenseError::PayerNotFound(_))));

    let unknown_group = repo.create(expense(Uuid::new_v4(), Uuid::new_v4(), 100)).await;
    assert!(matches!(unknown_group, Err(ExpenseError::GroupNotFound(_))));

    let listed = repo.list_for_group(Uuid::new_v4()).await;
    assert!(matches!(listed, Err(ExpenseError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_delete_expense() {
    let db = setup_db().await;
    let group = GroupRepository::new(db.clone()).create("Trip").await.unwrap();
    let alice = MemberRepository::new(db.clone())
        .create(group.id, "Alice")
        .await
        .unwrap();
    let repo = ExpenseRepository::new(db);

    let created = repo.create(expense(group.id, alice.id, 100)).await.unwrap();
    repo.delete(created.expense.id).await.expect("Failed to delete expense");

    assert!(repo.list_for_group(group.id).await.unwrap().is_empty());
    assert!(matches!(
        repo.delete(created.expense.id).await,
        Err(ExpenseError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_amount_above_limit_is_rejected_by_schema() {
    let db = setup_db().await;
    let group = GroupRepository::new(db.clone()).create("Trip").await.unwrap();
    let alice = MemberRepository::new(db.clone())
        .create(group.id, "Alice")
        .await
        .unwrap();
    let repo = ExpenseRepository::new(db);

    let at_limit = repo.create(expense(group.id, alice.id, 2_147_483_647)).await;
    assert!(at_limit.is_ok());

    let over_limit = repo.create(expense(group.id, alice.id, 2_147_483_648)).await;
    assert!(matches!(over_limit, Err(ExpenseError::Database(_))));

    let listed = repo.list_for_group(group.id).await.unwrap();
    assert_eq!(listed.len(), 1);
}
