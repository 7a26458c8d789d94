//! Property listing domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use haven_core::{AgentId, PropertyId};

/// A property listing (domain type).
///
/// Serialized directly into API responses; `price` round-trips as a string
/// to preserve the NUMERIC(10,2) column exactly.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    /// Unique property ID.
    pub id: PropertyId,
    /// The listing agent.
    pub agent_id: AgentId,
    /// Listing title.
    pub title: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Asking price.
    pub price: Decimal,
    /// Street address.
    pub address: String,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}
