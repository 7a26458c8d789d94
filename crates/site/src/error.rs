//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::identity::AuthError;
use crate::services::profile::{ProfileError, ValidationErrors};

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Identity provider operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request input failed validation.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Validation(errors) => Self::Validation(errors),
            ProfileError::NotFound => Self::NotFound("User not found".to_string()),
            ProfileError::CredentialHash => {
                Self::Internal("credential hashing failed".to_string())
            }
            ProfileError::Repository(e) => Self::Database(e),
        }
    }
}

impl AppError {
    /// Split into a status code and JSON body.
    ///
    /// Internal error details are never exposed to clients.
    fn parts(&self) -> (StatusCode, Value) {
        match self {
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error"}),
            ),
            Self::Auth(err) => {
                let status = match err {
                    AuthError::EmailInUse => StatusCode::CONFLICT,
                    AuthError::WeakSecret(_) | AuthError::InvalidEmail(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    AuthError::AccountDisabled => StatusCode::FORBIDDEN,
                    AuthError::Provider(_) | AuthError::Http(_) => StatusCode::BAD_GATEWAY,
                };
                (status, json!({"error": err.user_message()}))
            }
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "message": "The given data was invalid.",
                    "errors": errors,
                }),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, json!({"error": msg})),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an email.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");

        let err = AppError::BadRequest("Email parameter is required".to_string());
        assert_eq!(err.to_string(), "Bad request: Email parameter is required");
    }

    #[test]
    fn test_status_codes() {
        fn status(err: &AppError) -> StatusCode {
            err.parts().0
        }

        assert_eq!(
            status(&AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(&AppError::BadRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(&AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(&AppError::Validation(ValidationErrors::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(&AppError::Auth(AuthError::EmailInUse)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(&AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(&AppError::Auth(AuthError::AccountDisabled)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(&AppError::Auth(AuthError::Provider("BOOM".to_string()))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_missing_email_body_shape() {
        let err = AppError::BadRequest("Email parameter is required".to_string());
        let (status, body) = err.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Email parameter is required"}));
    }

    #[test]
    fn test_not_found_body_shape() {
        let err = AppError::NotFound("User not found".to_string());
        let (_, body) = err.parts();
        assert_eq!(body, json!({"error": "User not found"}));
    }

    #[test]
    fn test_validation_body_carries_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "name is required");
        let err = AppError::Validation(errors);

        let (_, body) = err.parts();
        assert_eq!(body["errors"]["name"], json!(["name is required"]));
        assert_eq!(body["message"], json!("The given data was invalid."));
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "password_hash column mangled".to_string(),
        ));
        let (_, body) = err.parts();
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[test]
    fn test_profile_not_found_maps_to_user_not_found() {
        let err = AppError::from(ProfileError::NotFound);
        let (status, body) = err.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "User not found"}));
    }
}
