//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiResult};
use evenshare_core::validation::{ValidationError, validate_amount, validate_description};
use evenshare_db::{
    ExpenseRepository,
    entities::{expenses, members},
    repositories::{CreateExpenseInput, ExpenseWithPayer},
};
use evenshare_shared::types::format_cents;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups/{group_id}/expenses",
            get(list_expenses).post(create_expense),
        )
        .route("/expenses/{expense_id}", delete(delete_expense))
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Member who paid.
    pub payer_id: Option<Uuid>,
    /// What the money was spent on.
    #[serde(default)]
    pub description: String,
    /// Amount in major units, as a number or a string.
    pub amount: Option<Decimal>,
    /// Date of the expense.
    pub spent_at: Option<NaiveDate>,
}

/// Payer summary embedded in expense responses.
#[derive(Debug, Serialize)]
pub struct PayerResponse {
    /// Member ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Owning group ID.
    pub group_id: Uuid,
    /// ID of the member who paid.
    pub payer_id: Uuid,
    /// Member who paid.
    pub payer: Option<PayerResponse>,
    /// Description.
    pub description: String,
    /// Amount in cents.
    pub amount_cents: i64,
    /// Amount formatted with two decimals.
    pub amount: String,
    /// Date of the expense.
    pub spent_at: Option<NaiveDate>,
    /// When the expense was recorded.
    pub created_at: DateTime<FixedOffset>,
}

impl ExpenseResponse {
    /// Builds a response from an expense row and its payer.
    #[must_use]
    pub fn new(expense: expenses::Model, payer: Option<members::Model>) -> Self {
        Self {
            id: expense.id,
            group_id: expense.group_id,
            payer_id: expense.payer_id,
            payer: payer.map(|p| PayerResponse {
                id: p.id,
                name: p.name,
            }),
            description: expense.description,
            amount: format_cents(expense.amount_cents),
            amount_cents: expense.amount_cents,
            spent_at: expense.spent_at,
            created_at: expense.created_at,
        }
    }
}

impl From<ExpenseWithPayer> for ExpenseResponse {
    fn from(e: ExpenseWithPayer) -> Self {
        Self::new(e.expense, e.payer)
    }
}

/// GET `/groups/{group_id}/expenses` - List every expense of a group.
async fn list_expenses(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let repo = ExpenseRepository::new((*state.db).clone());
    let expenses: Vec<ExpenseResponse> = repo
        .list_for_group(group_id)
        .await?
        .into_iter()
        .map(ExpenseResponse::from)
        .collect();

    Ok(Json(expenses))
}

/// POST `/groups/{group_id}/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseResponse>)> {
    let payer_id = payload
        .payer_id
        .ok_or(ValidationError::Required { field: "payer_id" })?;
    let description = validate_description(&payload.description)?;
    let amount = payload
        .amount
        .ok_or(ValidationError::Required { field: "amount" })?;
    let amount_cents = validate_amount(amount)?.get();

    let repo = ExpenseRepository::new((*state.db).clone());
    let created = repo
        .create(CreateExpenseInput {
            group_id,
            payer_id,
            description,
            amount_cents,
            spent_at: payload.spent_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// DELETE `/expenses/{expense_id}` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ExpenseRepository::new((*state.db).clone());
    repo.delete(expense_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
