//! Business services for the site.
//!
//! - [`identity`] - client for the external identity provider
//! - [`profile`] - profile lookup, lazy creation, and validated updates

pub mod identity;
pub mod profile;

pub use identity::{AuthError, Identity, IdentityClient};
pub use profile::{ProfileError, ProfileService, ValidationErrors};
