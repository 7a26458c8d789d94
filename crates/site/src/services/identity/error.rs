//! Identity provider error types.

use thiserror::Error;

/// Errors that can occur talking to the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email is already registered at the provider.
    #[error("email already in use")]
    EmailInUse,

    /// The secret does not meet the provider's requirements.
    #[error("weak secret: {0}")]
    WeakSecret(String),

    /// The email was rejected by the provider.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Unknown email or wrong secret.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but has been disabled by an administrator.
    #[error("account disabled")]
    AccountDisabled,

    /// Unrecognized provider error code.
    #[error("provider error: {0}")]
    Provider(String),

    /// Transport-level failure reaching the provider.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AuthError {
    /// Map a provider error code to an error variant.
    ///
    /// Codes arrive as the `message` field of the provider's error body.
    /// `WEAK_PASSWORD` carries explanatory text after a colon, which is
    /// preserved for the user.
    #[must_use]
    pub fn from_provider_code(code: &str) -> Self {
        let (head, detail) = match code.split_once(" : ") {
            Some((head, detail)) => (head, Some(detail)),
            None => (code, None),
        };

        match head {
            "EMAIL_EXISTS" => Self::EmailInUse,
            "WEAK_PASSWORD" => Self::WeakSecret(
                detail
                    .unwrap_or("secret does not meet the minimum requirements")
                    .to_string(),
            ),
            "INVALID_EMAIL" | "MISSING_EMAIL" => Self::InvalidEmail(code.to_string()),
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                Self::InvalidCredentials
            }
            "USER_DISABLED" => Self::AccountDisabled,
            _ => Self::Provider(code.to_string()),
        }
    }

    /// Human-readable message suitable for showing to the end user.
    ///
    /// Provider codes and transport details never leak through here.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmailInUse => "An account with this email already exists".to_string(),
            Self::WeakSecret(detail) => detail.clone(),
            Self::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            Self::InvalidCredentials => "Incorrect email or password".to_string(),
            Self::AccountDisabled => "This account has been disabled".to_string(),
            Self::Provider(_) | Self::Http(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_email_exists() {
        assert!(matches!(
            AuthError::from_provider_code("EMAIL_EXISTS"),
            AuthError::EmailInUse
        ));
    }

    #[test]
    fn test_maps_weak_password_with_detail() {
        let err =
            AuthError::from_provider_code("WEAK_PASSWORD : Password should be at least 6 characters");
        match err {
            AuthError::WeakSecret(detail) => {
                assert_eq!(detail, "Password should be at least 6 characters");
            }
            other => panic!("expected WeakSecret, got {other:?}"),
        }
    }

    #[test]
    fn test_maps_credential_failures_to_one_variant() {
        for code in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
            assert!(matches!(
                AuthError::from_provider_code(code),
                AuthError::InvalidCredentials
            ));
        }
    }

    #[test]
    fn test_maps_user_disabled() {
        assert!(matches!(
            AuthError::from_provider_code("USER_DISABLED"),
            AuthError::AccountDisabled
        ));
    }

    #[test]
    fn test_unknown_code_preserved() {
        match AuthError::from_provider_code("TOO_MANY_ATTEMPTS_TRY_LATER") {
            AuthError::Provider(code) => assert_eq!(code, "TOO_MANY_ATTEMPTS_TRY_LATER"),
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_user_message_hides_provider_codes() {
        let err = AuthError::from_provider_code("SOME_INTERNAL_CODE");
        assert!(!err.user_message().contains("SOME_INTERNAL_CODE"));
    }
}
