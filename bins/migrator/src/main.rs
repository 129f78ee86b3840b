//! Database migration runner for Evenshare.
//!
//! Reads `DATABASE_URL` (or `-u <url>`), so the same binary migrates
//! PostgreSQL and SQLite databases.
//!
//! Usage:
//!   migrator up       - Apply pending migrations
//!   migrator down     - Roll back the last migration
//!   migrator status   - Show applied and pending migrations
//!   migrator refresh  - Roll back everything, then apply again

use evenshare_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own subscriber
    cli::run_cli(Migrator).await;
}
