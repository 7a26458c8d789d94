//! Profile service.
//!
//! Reconciles externally authenticated identities with local profile
//! records: read-or-create projection on session bootstrap, and the
//! validated update path. Creation happens only on the read path - an
//! update for an unknown email is an error, never an implicit create.

mod error;

pub use error::{ProfileError, ValidationErrors};

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;

use haven_core::Email;

use crate::db::RepositoryError;
use crate::db::profiles::{ProfileChanges, ProfileRepository};
use crate::models::profile::Profile;

/// Maximum display-name length.
const MAX_NAME_LENGTH: usize = 255;
/// Maximum bio length.
const MAX_BIO_LENGTH: usize = 1000;
/// Maximum phone length.
const MAX_PHONE_LENGTH: usize = 20;
/// Maximum location length.
const MAX_LOCATION_LENGTH: usize = 255;

/// A full profile update, keyed by email.
///
/// Optional fields set to `None` are cleared; an empty string is an explicit
/// "cleared" value supplied by the caller. The email is the lookup key only
/// and is never changed by an update.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    pub email: String,
    pub name: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Profile service.
///
/// Orchestrates the sync flow between the identity provider's notion of a
/// user (an email) and the local profile store.
pub struct ProfileService<'a> {
    profiles: ProfileRepository<'a>,
}

impl<'a> ProfileService<'a> {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool),
        }
    }

    /// Look up the profile for an email, creating it if absent.
    ///
    /// New records get the fallback display name (may be empty) and a
    /// placeholder credential that is never used to authenticate -
    /// authentication lives at the identity provider, but the store schema
    /// requires a credential column.
    ///
    /// Exactly one record per email survives concurrent first-reads: a
    /// losing create observes `Conflict` from the store's unique index and
    /// recovers by re-reading the winner's record.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Validation` with an `email` entry if the email
    /// is missing or malformed.
    /// Returns `ProfileError::Repository` if the store fails.
    pub async fn get_or_create(
        &self,
        email: &str,
        fallback_name: &str,
    ) -> Result<Profile, ProfileError> {
        let email = parse_email_field(email)?;

        if let Some(profile) = self.profiles.find_by_email(&email).await? {
            return Ok(profile);
        }

        let credential = placeholder_credential()?;
        match self.profiles.create(&email, fallback_name, &credential).await {
            Ok(profile) => Ok(profile),
            Err(RepositoryError::Conflict(_)) => {
                // Someone else created it between our lookup and insert;
                // their record is the one record for this email.
                self.profiles
                    .find_by_email(&email)
                    .await?
                    .ok_or(ProfileError::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Validate and apply a full profile update.
    ///
    /// Validation failures are collected per field and returned together;
    /// nothing is written unless every field passes.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Validation` with a field-to-messages map if
    /// any field fails validation.
    /// Returns `ProfileError::NotFound` if no profile exists for the email.
    /// Returns `ProfileError::Repository` if the store fails.
    pub async fn update(&self, update: &UpdateProfile) -> Result<Profile, ProfileError> {
        let email = validate_update(update)?;

        let changes = ProfileChanges {
            name: update.name.clone(),
            bio: update.bio.clone(),
            phone: update.phone.clone(),
            location: update.location.clone(),
        };

        match self.profiles.update(&email, &changes).await {
            Ok(profile) => Ok(profile),
            Err(RepositoryError::NotFound) => Err(ProfileError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

/// Parse the email field, mapping parse failures to a field-keyed message.
fn parse_email_field(email: &str) -> Result<Email, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    match check_email(email, &mut errors) {
        Some(parsed) => Ok(parsed),
        None => Err(errors),
    }
}

/// Validate every field of an update, collecting messages per field.
fn validate_update(update: &UpdateProfile) -> Result<Email, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = check_email(&update.email, &mut errors);

    if update.name.is_empty() {
        errors.add("name", "name is required");
    } else if update.name.chars().count() > MAX_NAME_LENGTH {
        errors.add(
            "name",
            format!("name must be at most {MAX_NAME_LENGTH} characters"),
        );
    }

    check_optional_length(update.bio.as_deref(), "bio", MAX_BIO_LENGTH, &mut errors);
    check_optional_length(update.phone.as_deref(), "phone", MAX_PHONE_LENGTH, &mut errors);
    check_optional_length(
        update.location.as_deref(),
        "location",
        MAX_LOCATION_LENGTH,
        &mut errors,
    );

    match (email, errors.into_result()) {
        (Some(parsed), Ok(())) => Ok(parsed),
        (_, Err(errors)) => Err(errors),
        // check_email always records a message when it returns None
        (None, Ok(())) => unreachable!("email failure without recorded message"),
    }
}

/// Validate the email field, recording a message on failure.
fn check_email(email: &str, errors: &mut ValidationErrors) -> Option<Email> {
    if email.is_empty() {
        errors.add("email", "email is required");
        return None;
    }

    match Email::parse(email) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.add("email", e.to_string());
            None
        }
    }
}

/// Validate an optional field's length, recording a message on failure.
fn check_optional_length(
    value: Option<&str>,
    field: &str,
    max: usize,
    errors: &mut ValidationErrors,
) {
    if let Some(value) = value
        && value.chars().count() > max
    {
        errors.add(field, format!("{field} must be at most {max} characters"));
    }
}

/// Generate the placeholder credential stored alongside new profiles.
///
/// A random throwaway secret, hashed with Argon2id. The value is write-only:
/// nothing in the application reads it back, and it cannot be used to sign
/// in anywhere. The store schema simply requires a credential column.
fn placeholder_credential() -> Result<String, ProfileError> {
    let throwaway: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(throwaway.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ProfileError::CredentialHash)
}
