//! HTTP route handlers for the site API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (probes the database)
//!
//! # Profile (sync flow)
//! GET  /api/profile             - Fetch-or-create profile by email
//! PUT  /api/profile             - Validated full-field profile update
//! GET  /api/profile/properties  - Listing read-through for a profile
//!
//! # Properties
//! GET  /api/properties          - Paginated listing index
//! POST /api/properties          - Create a listing
//! GET  /api/properties/{id}     - Listing detail
//!
//! # Auth (delegated to the identity provider)
//! POST /api/auth/login          - Sign in, then bootstrap the profile
//! POST /api/auth/register       - Sign up, then bootstrap the profile
//! POST /api/auth/logout         - Sign out
//! ```

pub mod auth;
pub mod profile;
pub mod properties;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).put(profile::update))
        .route("/properties", get(profile::properties))
}

/// Create the property routes router.
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::index).post(properties::store))
        .route("/{id}", get(properties::show))
}

/// Create the auth routes router.
///
/// Carries the strict rate limiter: these endpoints relay credentials to
/// the identity provider.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create all `/api` routes for the site.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profile", profile_routes())
        .nest("/properties", property_routes())
        .layer(api_rate_limiter())
        .nest("/auth", auth_routes())
}
