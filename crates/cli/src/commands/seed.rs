//! Seed the database with demo property listings.
//!
//! Inserts a small fixed set of listings so the front end has something to
//! render against a fresh database. Safe to run repeatedly; pass `--fresh`
//! to clear the table first.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use super::migrate::{MigrationError, database_url};

/// One demo listing: (agent_id, title, description, price in cents, address).
const DEMO_LISTINGS: &[(i32, &str, &str, i64, &str)] = &[
    (
        1,
        "Sunny two-bedroom near the park",
        "Top-floor unit with southern exposure and a renovated kitchen.",
        42_500_000,
        "12 Elm Street",
    ),
    (
        1,
        "Downtown loft with exposed brick",
        "Open-plan loft in a converted warehouse, walking distance to transit.",
        61_000_000,
        "88 Foundry Lane, Unit 4",
    ),
    (
        2,
        "Craftsman bungalow on a corner lot",
        "Original woodwork, new roof, detached garage.",
        38_990_000,
        "301 Maple Avenue",
    ),
    (
        2,
        "Lakeside cottage",
        "Three seasons of waterfront living, dock included.",
        27_500_000,
        "7 Shoreline Drive",
    ),
    (
        3,
        "New-build townhouse",
        "End unit with two-car garage and builder warranty.",
        53_450_000,
        "19 Juniper Row",
    ),
];

/// Insert demo property listings.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is unset or any insert fails.
pub async fn properties(fresh: bool) -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;
    let pool = PgPool::connect(database_url.expose_secret()).await?;
    info!("Connected to database");

    if fresh {
        let deleted = sqlx::query("DELETE FROM properties")
            .execute(&pool)
            .await?
            .rows_affected();
        info!(deleted, "Cleared existing listings");
    }

    let mut inserted = 0_u64;
    for (agent_id, title, description, price_cents, address) in DEMO_LISTINGS {
        let price = Decimal::new(*price_cents, 2);

        sqlx::query(
            r"
            INSERT INTO properties (agent_id, title, description, price, address)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(agent_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(address)
        .execute(&pool)
        .await?;

        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Listings inserted: {inserted}");

    Ok(())
}
