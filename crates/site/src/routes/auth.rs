//! Authentication route handlers.
//!
//! Credentials are relayed to the external identity provider; no secret is
//! ever verified or stored locally. A successful sign-in or sign-up runs
//! the profile sync flow for the identity's email, so the client gets its
//! local profile in the same round trip as its session bootstrap.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::routes::profile::UserPayload;
use crate::services::identity::Identity;
use crate::services::profile::ProfileService;
use crate::state::AppState;

// =============================================================================
// Payload Types
// =============================================================================

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub secret: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub secret: String,
    /// Display name for the freshly created profile.
    pub name: Option<String>,
}

/// The identity object embedded in auth responses.
///
/// Tokens stay server-side; only descriptive fields go to the client.
#[derive(Debug, Serialize)]
pub struct IdentityPayload {
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

impl From<&Identity> for IdentityPayload {
    fn from(identity: &Identity) -> Self {
        Self {
            email: identity.email.as_str().to_string(),
            display_name: identity.display_name.clone(),
            email_verified: identity.email_verified,
        }
    }
}

/// Response for login and register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub identity: IdentityPayload,
    pub user: UserPayload,
}

/// Response for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Sign in at the identity provider and bootstrap the local profile.
///
/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let identity = state.identity().sign_in(&body.email, &body.secret).await?;
    set_sentry_user(identity.email.as_str());

    let fallback_name = identity.display_name.clone().unwrap_or_default();
    let profile = ProfileService::new(state.pool())
        .get_or_create(identity.email.as_str(), &fallback_name)
        .await?;

    tracing::info!(email = %identity.email, "signed in");

    Ok(Json(AuthResponse {
        success: true,
        identity: IdentityPayload::from(&identity),
        user: profile.into(),
    }))
}

/// Register at the identity provider and bootstrap the local profile.
///
/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let identity = state.identity().sign_up(&body.email, &body.secret).await?;
    set_sentry_user(identity.email.as_str());

    // Caller-supplied name wins over whatever the provider holds
    let fallback_name = body
        .name
        .or_else(|| identity.display_name.clone())
        .unwrap_or_default();
    let profile = ProfileService::new(state.pool())
        .get_or_create(identity.email.as_str(), &fallback_name)
        .await?;

    tracing::info!(email = %identity.email, "registered");

    Ok(Json(AuthResponse {
        success: true,
        identity: IdentityPayload::from(&identity),
        user: profile.into(),
    }))
}

/// Sign out: clear the provider session and the Sentry user scope.
///
/// `POST /api/auth/logout`
pub async fn logout(State(state): State<AppState>) -> Json<LogoutResponse> {
    state.identity().sign_out();
    clear_sentry_user();

    Json(LogoutResponse { success: true })
}
