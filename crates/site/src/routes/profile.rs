//! Profile route handlers.
//!
//! The sync flow's HTTP surface: fetch-or-create by email, validated
//! update, and the listing read-through. The email query/body parameter is
//! the only key - there is no check that the caller is authenticated as
//! that email (see DESIGN.md, trust boundary).

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haven_core::{Email, ProfileId};

use crate::db::{ProfileRepository, PropertyRepository};
use crate::error::{AppError, Result};
use crate::models::profile::Profile;
use crate::models::property::Property;
use crate::services::profile::{ProfileService, UpdateProfile};
use crate::state::AppState;

// =============================================================================
// Payload Types
// =============================================================================

/// Query parameters for profile fetch endpoints.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub email: Option<String>,
    /// Fallback display name used when the fetch creates the profile.
    pub name: Option<String>,
}

/// Profile update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// The `user` object embedded in profile responses.
///
/// Nullable bio/phone/location surface as empty strings, never null - a
/// presentation contract, not a storage one.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub id: ProfileId,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub phone: String,
    pub location: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for UserPayload {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email.into_inner(),
            bio: profile.bio.unwrap_or_default(),
            phone: profile.phone.unwrap_or_default(),
            location: profile.location.unwrap_or_default(),
            email_verified_at: profile.email_verified_at,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Response for profile fetch.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserPayload,
}

/// Response for profile update.
#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: UserPayload,
}

/// Response for the listing read-through.
#[derive(Debug, Serialize)]
pub struct ProfilePropertiesResponse {
    pub success: bool,
    pub properties: Vec<Property>,
}

/// Extract a required, non-empty email parameter.
fn require_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) if !email.is_empty() => Ok(email),
        _ => Err(AppError::BadRequest("Email parameter is required".to_string())),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Fetch the profile for an email, creating it on first sight.
///
/// `GET /api/profile?email=<e>&name=<n>`
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfileResponse>> {
    let email = require_email(query.email)?;

    let service = ProfileService::new(state.pool());
    let profile = service
        .get_or_create(&email, query.name.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        user: profile.into(),
    }))
}

/// Apply a full profile update.
///
/// `PUT /api/profile`
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdatedResponse>> {
    let service = ProfileService::new(state.pool());
    let profile = service
        .update(&UpdateProfile {
            email: body.email,
            name: body.name,
            bio: body.bio,
            phone: body.phone,
            location: body.location,
        })
        .await?;

    Ok(Json(ProfileUpdatedResponse {
        success: true,
        message: "Profile updated successfully",
        user: profile.into(),
    }))
}

/// Listing read-through for a profile.
///
/// `GET /api/profile/properties?email=<e>`
///
/// An unknown (or malformed) email yields an empty list rather than an
/// error; a known profile sees the full listing set.
pub async fn properties(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfilePropertiesResponse>> {
    let email = require_email(query.email)?;

    let properties = match Email::parse(&email) {
        Err(_) => Vec::new(),
        Ok(email) => {
            let profiles = ProfileRepository::new(state.pool());
            if profiles.find_by_email(&email).await?.is_some() {
                PropertyRepository::new(state.pool()).list_all().await?
            } else {
                Vec::new()
            }
        }
    };

    Ok(Json(ProfilePropertiesResponse {
        success: true,
        properties,
    }))
}
