//! Shared helpers for Haven integration tests.
//!
//! The tests in `tests/` drive a running site server over HTTP. They are
//! `#[ignore]`d by default; run them with a server and database up:
//!
//! ```bash
//! cargo run -p haven-cli -- migrate site
//! cargo run -p haven-site &
//! cargo test -p haven-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the site API (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Create an HTTP client for talking to the site.
///
/// # Panics
///
/// Panics if the client cannot be constructed (test-only code).
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a fresh, never-seen email address for a test run.
#[must_use]
pub fn fresh_email() -> String {
    format!("it-{}@example.com", uuid::Uuid::new_v4().simple())
}
