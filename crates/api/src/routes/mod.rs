//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod balances;
pub mod expenses;
pub mod groups;
pub mod health;
pub mod members;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(groups::routes())
        .merge(members::routes())
        .merge(expenses::routes())
        .merge(balances::routes())
}
