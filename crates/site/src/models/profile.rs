//! Profile domain types.

use chrono::{DateTime, Utc};

use haven_core::{Email, ProfileId};

/// A user profile (domain type).
///
/// A local projection of an externally authenticated identity, keyed by
/// email. Created lazily the first time an email is looked up; the external
/// provider remains the authority on who is signed in.
///
/// The placeholder credential stored alongside the record is write-only and
/// deliberately absent here: nothing in the application reads it back.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Unique profile ID.
    pub id: ProfileId,
    /// Display name (may be empty for profiles created from a bare email).
    pub name: String,
    /// Email address; unique across all profiles.
    pub email: Email,
    /// Free-text bio, unset until the user fills it in.
    pub bio: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// When the provider reported the email verified, if ever.
    pub email_verified_at: Option<DateTime<Utc>>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}
