//! Integration tests for the profile API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p haven-cli -- migrate site)
//! - The site server running (cargo run -p haven-site)
//!
//! Run with: cargo test -p haven-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use haven_integration_tests::{client, fresh_email, site_base_url};

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_profile_without_email_returns_400() {
    let resp = client()
        .get(format!("{}/api/profile", site_base_url()))
        .send()
        .await
        .expect("Failed to call profile endpoint");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body, json!({"error": "Email parameter is required"}));
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_profile_created_on_first_fetch_with_empty_optionals() {
    let email = fresh_email();

    let resp = client()
        .get(format!("{}/api/profile", site_base_url()))
        .query(&[("email", email.as_str()), ("name", "Alice")])
        .send()
        .await
        .expect("Failed to fetch profile");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!(email));
    assert_eq!(body["user"]["name"], json!("Alice"));
    // Absent optionals surface as empty strings, never null
    assert_eq!(body["user"]["bio"], json!(""));
    assert_eq!(body["user"]["phone"], json!(""));
    assert_eq!(body["user"]["location"], json!(""));
    assert_eq!(body["user"]["email_verified_at"], Value::Null);
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_fetch_is_idempotent() {
    let email = fresh_email();
    let base_url = site_base_url();

    let first: Value = client()
        .get(format!("{base_url}/api/profile"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("first fetch")
        .json()
        .await
        .expect("first body");

    let second: Value = client()
        .get(format!("{base_url}/api/profile"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("second fetch")
        .json()
        .await
        .expect("second body");

    assert_eq!(first["user"]["id"], second["user"]["id"]);
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_concurrent_first_fetch_yields_one_record() {
    let email = fresh_email();
    let base_url = site_base_url();

    let fetch = |email: String, base_url: String| async move {
        client()
            .get(format!("{base_url}/api/profile"))
            .query(&[("email", email.as_str())])
            .send()
            .await
            .expect("fetch")
            .json::<Value>()
            .await
            .expect("body")
    };

    let (a, b) = tokio::join!(
        fetch(email.clone(), base_url.clone()),
        fetch(email.clone(), base_url.clone())
    );

    // Both callers see the same single record
    assert_eq!(a["success"], json!(true));
    assert_eq!(b["success"], json!(true));
    assert_eq!(a["user"]["id"], b["user"]["id"]);
    assert_eq!(a["user"]["email"], json!(email));
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_update_roundtrip_bumps_updated_at() {
    let email = fresh_email();
    let base_url = site_base_url();

    // Create via first fetch
    let created: Value = client()
        .get(format!("{base_url}/api/profile"))
        .query(&[("email", email.as_str()), ("name", "Alice")])
        .send()
        .await
        .expect("create fetch")
        .json()
        .await
        .expect("create body");
    let created_at = created["user"]["created_at"]
        .as_str()
        .expect("created_at present")
        .to_string();

    // Full update
    let resp = client()
        .put(format!("{base_url}/api/profile"))
        .json(&json!({
            "email": email,
            "name": "Alice B",
            "bio": "bio text",
            "phone": "555",
            "location": "NYC",
        }))
        .send()
        .await
        .expect("update request");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("update body");
    assert_eq!(updated["success"], json!(true));
    assert_eq!(updated["message"], json!("Profile updated successfully"));

    // Read back
    let fetched: Value = client()
        .get(format!("{base_url}/api/profile"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("readback fetch")
        .json()
        .await
        .expect("readback body");

    assert_eq!(fetched["user"]["name"], json!("Alice B"));
    assert_eq!(fetched["user"]["bio"], json!("bio text"));
    assert_eq!(fetched["user"]["phone"], json!("555"));
    assert_eq!(fetched["user"]["location"], json!("NYC"));

    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at).expect("valid created_at");
    let updated_at = chrono::DateTime::parse_from_rfc3339(
        fetched["user"]["updated_at"]
            .as_str()
            .expect("updated_at present"),
    )
    .expect("valid updated_at");
    assert!(updated_at > created_at);
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_update_unknown_email_returns_404() {
    let resp = client()
        .put(format!("{}/api/profile", site_base_url()))
        .json(&json!({
            "email": fresh_email(),
            "name": "Nobody",
        }))
        .send()
        .await
        .expect("update request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("body");
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_update_with_long_name_returns_field_errors() {
    let email = fresh_email();
    let base_url = site_base_url();

    // Ensure the profile exists so only validation can fail
    client()
        .get(format!("{base_url}/api/profile"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("create fetch");

    let resp = client()
        .put(format!("{base_url}/api/profile"))
        .json(&json!({
            "email": email,
            "name": "x".repeat(256),
        }))
        .send()
        .await
        .expect("update request");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("body");
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_validation_is_collected_not_fail_fast() {
    let resp = client()
        .put(format!("{}/api/profile", site_base_url()))
        .json(&json!({
            "email": "",
            "name": "",
            "bio": "b".repeat(1001),
        }))
        .send()
        .await
        .expect("update request");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("body");
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["bio"].is_array());
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_profile_properties_unknown_email_is_empty_success() {
    let resp = client()
        .get(format!("{}/api/profile/properties", site_base_url()))
        .query(&[("email", fresh_email().as_str())])
        .send()
        .await
        .expect("read-through request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("body");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["properties"], json!([]));
}

#[tokio::test]
#[ignore = "Requires running site server and database"]
async fn test_profile_properties_without_email_returns_400() {
    let resp = client()
        .get(format!("{}/api/profile/properties", site_base_url()))
        .send()
        .await
        .expect("read-through request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("body");
    assert_eq!(body, json!({"error": "Email parameter is required"}));
}
