//! Balance routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::debug;
use uuid::Uuid;

use crate::{AppState, error::ApiResult};
use evenshare_core::balance::{BalanceEngine, BalanceReport};
use evenshare_db::GroupRepository;

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/groups/{group_id}/balances", get(get_balances))
}

/// GET `/groups/{group_id}/balances` - Compute who owes whom.
///
/// Computed on every request from a fresh snapshot; nothing is cached.
async fn get_balances(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<Json<BalanceReport>> {
    let repo = GroupRepository::new((*state.db).clone());
    let snapshot = repo.load_balance_snapshot(group_id).await?;

    let report = BalanceEngine::calculate(&snapshot.group, &snapshot.members, &snapshot.expenses);

    debug!(
        group_id = %group_id,
        total_cents = report.summary.total_cents,
        settlements = report.settlements.len(),
        "Balances calculated"
    );

    Ok(Json(report))
}
