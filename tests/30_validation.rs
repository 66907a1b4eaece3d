mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// validate-carrier requires at least one identifier, checked before any
/// upstream call is made.
#[tokio::test]
async fn validate_carrier_requires_an_identifier() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/validate-carrier", server.base_url);

    for body in [json!({}), json!({ "dotNumber": "", "mcNumber": "" })] {
        let res = client.post(&url).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["message"], "DOT number or MC number is required");
        assert_eq!(body["valid"], false);
    }

    Ok(())
}

/// A missing reset token is rejected before any query executes, so this
/// holds whether or not a database is reachable.
#[tokio::test]
async fn verify_reset_token_requires_a_token() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/auth/verify-reset-token", server.base_url);

    for body in [json!({}), json!({ "token": "  " })] {
        let res = client.post(&url).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["error"], "Reset token is required");
    }

    Ok(())
}

/// Bodies that fail JSON parsing follow the same taxonomy as every other
/// client error: 400 with a JSON `error` field, never axum's plain-text
/// 415/422 defaults.
#[tokio::test]
async fn malformed_bodies_are_bad_requests_with_json_errors() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/auth/verify-reset-token", server.base_url);

    // Wrong-typed field
    let res = client.post(&url).json(&json!({ "token": 123 })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string());

    // Not JSON at all
    let res = client
        .post(&url)
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string());

    // Missing content-type
    let res = client.post(&url).body("{}").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn register_validates_input_before_touching_the_database() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/auth/register", server.base_url);

    // Missing email
    let res = client.post(&url).json(&json!({ "password": "longenough" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Short password
    let res = client
        .post(&url)
        .json(&json!({ "email": "a@b.c", "password": "short", "name": "A" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown user type
    let res = client
        .post(&url)
        .json(&json!({ "email": "a@b.c", "password": "longenough", "name": "A", "userType": "broker" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
