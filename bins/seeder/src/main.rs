//! Demo data seeder for Evenshare development.
//!
//! Seeds two groups with members and a handful of expenses so the balances
//! endpoint has something to show. Groups that already exist by name are
//! skipped.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evenshare_core::validation::validate_amount;
use evenshare_db::{
    ExpenseRepository, GroupRepository, MemberRepository, repositories::CreateExpenseInput,
};
use sea_orm::DatabaseConnection;

/// A demo expense: payer index, description, amount, days ago.
type DemoExpense = (usize, &'static str, Decimal, i64);

struct DemoGroup {
    name: &'static str,
    members: &'static [&'static str],
    expenses: Vec<DemoExpense>,
}

fn demo_groups() -> Vec<DemoGroup> {
    vec![
        DemoGroup {
            name: "Kyoto Trip",
            members: &["Alice", "Bob", "Charlie"],
            expenses: vec![
                (0, "Train tickets", dec!(120.00), 6),
                (1, "Lunch", dec!(36.50), 4),
                (2, "Temple tickets", dec!(27.00), 2),
                (0, "Dinner", dec!(74.20), 1),
            ],
        },
        DemoGroup {
            name: "Roommates",
            members: &["Dana", "Eli", "Fin"],
            expenses: vec![
                (1, "Groceries", dec!(58.80), 3),
                (0, "Cleaning supplies", dec!(22.40), 1),
            ],
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evenshare=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    info!("Connecting to database...");
    let db = evenshare_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    for group in demo_groups() {
        seed_group(&db, &group).await?;
    }

    info!("Seeding complete!");
    Ok(())
}

async fn seed_group(db: &DatabaseConnection, demo: &DemoGroup) -> anyhow::Result<()> {
    let groups = GroupRepository::new(db.clone());
    let members = MemberRepository::new(db.clone());
    let expenses = ExpenseRepository::new(db.clone());

    let existing = groups.list_with_counts().await?;
    if existing.iter().any(|g| g.group.name == demo.name) {
        info!(group = demo.name, "Group already exists, skipping");
        return Ok(());
    }

    let group = groups.create(demo.name).await?;

    let mut member_ids = Vec::with_capacity(demo.members.len());
    for name in demo.members {
        member_ids.push(members.create(group.id, name).await?.id);
    }

    let today = Utc::now().date_naive();
    for &(payer, description, amount, days_ago) in &demo.expenses {
        let payer_id = *member_ids
            .get(payer)
            .with_context(|| format!("No member at index {payer} in {}", demo.name))?;
        expenses
            .create(CreateExpenseInput {
                group_id: group.id,
                payer_id,
                description: description.to_string(),
                amount_cents: validate_amount(amount)?.get(),
                spent_at: Some(today - Duration::days(days_ago)),
            })
            .await?;
    }

    info!(
        group = demo.name,
        members = member_ids.len(),
        expenses = demo.expenses.len(),
        "Group seeded"
    );
    Ok(())
}
