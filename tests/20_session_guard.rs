mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};

/// Every session-protected endpoint must answer exactly 401 when no valid
/// session accompanies the request, before anything touches the data layer.
#[tokio::test]
async fn protected_endpoints_require_a_session() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let endpoints = [
        (Method::GET, "/api/user/bids"),
        (Method::GET, "/api/user/shipments"),
        (Method::GET, "/api/payments"),
        (Method::POST, "/api/shipments"),
        (Method::GET, "/api/notifications"),
        (Method::GET, "/api/notifications/unread-count"),
        (Method::PATCH, "/api/notifications/mark-all-read"),
        (Method::POST, "/api/admin/payments/void"),
        (Method::GET, "/api/admin/stats"),
    ];

    for (method, path) in endpoints {
        let res = client
            .request(method.clone(), format!("{}{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} without a session",
            method,
            path
        );

        let body = res.json::<serde_json::Value>().await?;
        assert!(body["error"].is_string(), "{} {} error body", method, path);
    }

    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/user/bids", server.base_url))
        .header("authorization", "Bearer not-a-real-token")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/payments", server.base_url))
        .header("authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
