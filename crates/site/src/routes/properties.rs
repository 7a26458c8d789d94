//! Property route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use haven_core::{AgentId, PropertyId};

use crate::db::PropertyRepository;
use crate::db::properties::NewProperty;
use crate::error::{AppError, Result};
use crate::models::property::Property;
use crate::services::profile::ValidationErrors;
use crate::state::AppState;

/// Default page size for the listing index.
const DEFAULT_PER_PAGE: u32 = 15;
/// Upper bound on caller-supplied page sizes.
const MAX_PER_PAGE: u32 = 100;
/// Maximum title length.
const MAX_TITLE_LENGTH: usize = 255;

// =============================================================================
// Payload Types
// =============================================================================

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request body for creating a listing.
#[derive(Debug, Deserialize)]
pub struct CreatePropertyRequest {
    pub agent_id: Option<i32>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub address: String,
}

/// Response for the listing index.
#[derive(Debug, Serialize)]
pub struct PropertiesIndexResponse {
    pub success: bool,
    pub properties: Vec<Property>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Response for a single listing.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub success: bool,
    pub property: Property,
}

// =============================================================================
// Handlers
// =============================================================================

/// Paginated listing index, newest first.
///
/// `GET /api/properties?page=&per_page=`
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PropertiesIndexResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let repository = PropertyRepository::new(state.pool());
    let properties = repository.list(page, per_page).await?;
    let total = repository.count().await?;

    Ok(Json(PropertiesIndexResponse {
        success: true,
        properties,
        total,
        page,
        per_page,
    }))
}

/// Create a listing.
///
/// `POST /api/properties`
pub async fn store(
    State(state): State<AppState>,
    Json(body): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>)> {
    let new = validate_create(body)?;

    let property = PropertyRepository::new(state.pool()).create(&new).await?;

    Ok((
        StatusCode::CREATED,
        Json(PropertyResponse {
            success: true,
            property,
        }),
    ))
}

/// Listing detail.
///
/// `GET /api/properties/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PropertyResponse>> {
    let property = PropertyRepository::new(state.pool())
        .get(PropertyId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

    Ok(Json(PropertyResponse {
        success: true,
        property,
    }))
}

/// Validate a create request, collecting messages per field.
fn validate_create(body: CreatePropertyRequest) -> Result<NewProperty> {
    let mut errors = ValidationErrors::new();

    if body.title.is_empty() {
        errors.add("title", "title is required");
    } else if body.title.chars().count() > MAX_TITLE_LENGTH {
        errors.add(
            "title",
            format!("title must be at most {MAX_TITLE_LENGTH} characters"),
        );
    }

    if body.address.is_empty() {
        errors.add("address", "address is required");
    }

    let agent_id = match body.agent_id {
        Some(id) if id > 0 => Some(AgentId::new(id)),
        Some(_) => {
            errors.add("agent_id", "agent_id must be a positive integer");
            None
        }
        None => {
            errors.add("agent_id", "agent_id is required");
            None
        }
    };

    let price = match body.price {
        Some(price) if price.is_sign_negative() => {
            errors.add("price", "price must not be negative");
            None
        }
        Some(price) => Some(price),
        None => {
            errors.add("price", "price is required");
            None
        }
    };

    match (agent_id, price, errors.into_result()) {
        (Some(agent_id), Some(price), Ok(())) => Ok(NewProperty {
            agent_id,
            title: body.title,
            description: body.description,
            price,
            address: body.address,
        }),
        (_, _, Err(errors)) => Err(AppError::Validation(errors)),
        // every None above records a message first
        _ => Err(AppError::Internal("create validation inconsistency".to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_request() -> CreatePropertyRequest {
        CreatePropertyRequest {
            agent_id: Some(7),
            title: "Sunny two-bedroom".to_string(),
            description: Some("Close to the park.".to_string()),
            price: Some(Decimal::new(45_000_000, 2)),
            address: "12 Elm Street".to_string(),
        }
    }

    #[test]
    fn test_validate_create_accepts_valid_input() {
        let new = validate_create(valid_request()).unwrap();
        assert_eq!(new.agent_id.as_i32(), 7);
        assert_eq!(new.price.to_string(), "450000.00");
    }

    #[test]
    fn test_validate_create_requires_fields() {
        let body = CreatePropertyRequest {
            agent_id: None,
            title: String::new(),
            description: None,
            price: None,
            address: String::new(),
        };
        match validate_create(body) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.contains("agent_id"));
                assert!(errors.contains("title"));
                assert!(errors.contains("price"));
                assert!(errors.contains("address"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_create_rejects_negative_price() {
        let body = CreatePropertyRequest {
            price: Some(Decimal::new(-100, 0)),
            ..valid_request()
        };
        match validate_create(body) {
            Err(AppError::Validation(errors)) => assert!(errors.contains("price")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_create_rejects_long_title() {
        let body = CreatePropertyRequest {
            title: "t".repeat(256),
            ..valid_request()
        };
        match validate_create(body) {
            Err(AppError::Validation(errors)) => assert!(errors.contains("title")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
