//! Member routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiResult};
use evenshare_core::validation::validate_member_name;
use evenshare_db::{MemberRepository, entities::members};

/// Creates the member routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups/{group_id}/members", post(create_member))
        .route("/members/{member_id}", delete(delete_member))
}

/// Request body for adding a member.
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Response for a member.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    /// Member ID.
    pub id: Uuid,
    /// Owning group ID.
    pub group_id: Uuid,
    /// Display name.
    pub name: String,
    /// When the member joined.
    pub created_at: DateTime<FixedOffset>,
}

impl From<members::Model> for MemberResponse {
    fn from(m: members::Model) -> Self {
        Self {
            id: m.id,
            group_id: m.group_id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

/// POST `/groups/{group_id}/members` - Add a member to a group.
async fn create_member(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<CreateMemberRequest>,
) -> ApiResult<(StatusCode, Json<MemberResponse>)> {
    let name = validate_member_name(&payload.name)?;

    let repo = MemberRepository::new((*state.db).clone());
    let member = repo.create(group_id, &name).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// DELETE `/members/{member_id}` - Remove a member and the expenses they paid.
async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = MemberRepository::new((*state.db).clone());
    repo.delete_cascade(member_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
