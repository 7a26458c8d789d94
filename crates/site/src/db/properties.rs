//! Property repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use haven_core::{AgentId, PropertyId};

use super::RepositoryError;
use crate::models::property::Property;

/// Database row for a property listing.
#[derive(Debug, sqlx::FromRow)]
struct PropertyRow {
    id: i32,
    agent_id: i32,
    title: String,
    description: Option<String>,
    price: Decimal,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Self {
            id: PropertyId::new(row.id),
            agent_id: AgentId::new(row.agent_id),
            title: row.title,
            description: row.description,
            price: row.price,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields for a new property listing.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub agent_id: AgentId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub address: String,
}

/// Repository for property database operations.
pub struct PropertyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepository<'a> {
    /// Create a new property repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List properties, newest first, with limit/offset pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Property>, RepositoryError> {
        let limit = i64::from(per_page);
        let offset = i64::from(page.saturating_sub(1)) * limit;

        let rows = sqlx::query_as::<_, PropertyRow>(
            r"
            SELECT id, agent_id, title, description, price, address,
                   created_at, updated_at
            FROM properties
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Property::from).collect())
    }

    /// Count all property listings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM properties")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// List every property, newest first.
    ///
    /// This backs the profile read-through endpoint, which returns the full
    /// listing set rather than filtering by agent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Property>, RepositoryError> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            r"
            SELECT id, agent_id, title, description, price, address,
                   created_at, updated_at
            FROM properties
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Property::from).collect())
    }

    /// Get a property by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PropertyId) -> Result<Option<Property>, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r"
            SELECT id, agent_id, title, description, price, address,
                   created_at, updated_at
            FROM properties
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Property::from))
    }

    /// Create a new property listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProperty) -> Result<Property, RepositoryError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r"
            INSERT INTO properties (agent_id, title, description, price, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, agent_id, title, description, price, address,
                      created_at, updated_at
            ",
        )
        .bind(new.agent_id.as_i32())
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(new.price)
        .bind(&new.address)
        .fetch_one(self.pool)
        .await?;

        Ok(Property::from(row))
    }
}
