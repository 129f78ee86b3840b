//! Group routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{expenses::ExpenseResponse, members::MemberResponse};
use crate::{AppState, error::ApiResult};
use evenshare_core::validation::validate_group_name;
use evenshare_db::{GroupRepository, entities::groups};

/// Creates the group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/{group_id}", get(get_group).delete(delete_group))
}

/// Request body for creating a group.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    #[serde(default)]
    pub name: String,
}

/// Response for a group.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    /// Group ID.
    pub id: Uuid,
    /// Group name.
    pub name: String,
    /// When the group was created.
    pub created_at: DateTime<FixedOffset>,
}

impl From<groups::Model> for GroupResponse {
    fn from(g: groups::Model) -> Self {
        Self {
            id: g.id,
            name: g.name,
            created_at: g.created_at,
        }
    }
}

/// Group list entry with counts.
#[derive(Debug, Serialize)]
pub struct GroupSummaryResponse {
    /// The group.
    #[serde(flatten)]
    pub group: GroupResponse,
    /// Number of members.
    pub members_count: i64,
    /// Number of expenses.
    pub expenses_count: i64,
}

/// Group detail: the group fields plus its members and recent expenses.
#[derive(Debug, Serialize)]
pub struct GroupDetailResponse {
    /// The group.
    #[serde(flatten)]
    pub group: GroupResponse,
    /// Members in creation order.
    pub members: Vec<MemberResponse>,
    /// Latest expenses, newest first.
    pub expenses: Vec<ExpenseResponse>,
}

/// GET `/groups` - List groups with member and expense counts.
async fn list_groups(State(state): State<AppState>) -> ApiResult<Json<Vec<GroupSummaryResponse>>> {
    let repo = GroupRepository::new((*state.db).clone());
    let groups: Vec<GroupSummaryResponse> = repo
        .list_with_counts()
        .await?
        .into_iter()
        .map(|g| GroupSummaryResponse {
            group: g.group.into(),
            members_count: g.members_count,
            expenses_count: g.expenses_count,
        })
        .collect();

    Ok(Json(groups))
}

/// POST `/groups` - Create a group.
async fn create_group(
    State(state): State<AppState>,
    Json(payload): Json<CreateGroupRequest>,
) -> ApiResult<(StatusCode, Json<GroupResponse>)> {
    let name = validate_group_name(&payload.name)?;

    let repo = GroupRepository::new((*state.db).clone());
    let group = repo.create(&name).await?;

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// GET `/groups/{group_id}` - Show a group with members and recent expenses.
async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<GroupDetailResponse>> {
    let repo = GroupRepository::new((*state.db).clone());
    let detail = repo.get_detail(group_id).await?;

    Ok(Json(GroupDetailResponse {
        group: detail.group.into(),
        members: detail.members.into_iter().map(Into::into).collect(),
        expenses: detail
            .recent_expenses
            .into_iter()
            .map(|(expense, payer)| ExpenseResponse::new(expense, payer))
            .collect(),
    }))
}

/// DELETE `/groups/{group_id}` - Delete a group with its members and expenses.
async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = GroupRepository::new((*state.db).clone());
    repo.delete_cascade(group_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
