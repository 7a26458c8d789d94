//! Profile repository for database operations.
//!
//! Profiles are keyed by email: the application projects external identities
//! onto local records, so email (not a provider uid) is the lookup key.
//! Queries use the runtime sqlx API with explicit row types.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use haven_core::{Email, ProfileId};

use super::RepositoryError;
use crate::models::profile::Profile;

/// Database row for a profile record.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: i32,
    name: String,
    email: String,
    bio: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    email_verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Convert a row into a domain profile, re-validating the stored email.
    fn into_profile(self) -> Result<Profile, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Profile {
            id: ProfileId::new(self.id),
            name: self.name,
            email,
            bio: self.bio,
            phone: self.phone,
            location: self.location,
            email_verified_at: self.email_verified_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Full overwrite of a profile's editable fields.
///
/// `None` for an optional field clears it; the validation layer above decides
/// what values reach this point.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub name: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by email address.
    ///
    /// An absent profile is `Ok(None)`, never an error; the caller decides
    /// the creation policy.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, name, email, bio, phone, location,
                   email_verified_at, created_at, updated_at
            FROM profiles
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    /// Create a new profile with an email, display name, and placeholder credential.
    ///
    /// Bio, phone, and location start out unset; the verification timestamp
    /// is absent until the provider reports the email verified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists - the
    /// UNIQUE index on `profiles.email` is the enforcement point for the
    /// one-record-per-email invariant, so a concurrent first-create loses
    /// here rather than producing a duplicate.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO profiles (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, bio, phone, location,
                      email_verified_at, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_profile()
    }

    /// Overwrite a profile's editable fields, keyed by email.
    ///
    /// Bumps `updated_at`. The email itself is the lookup key and is not
    /// mutable through this operation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no profile exists for the email.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        email: &Email,
        changes: &ProfileChanges,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            UPDATE profiles
            SET name = $2, bio = $3, phone = $4, location = $5, updated_at = NOW()
            WHERE email = $1
            RETURNING id, name, email, bio, phone, location,
                      email_verified_at, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(&changes.name)
        .bind(changes.bio.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.location.as_deref())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => r.into_profile(),
            None => Err(RepositoryError::NotFound),
        }
    }
}
