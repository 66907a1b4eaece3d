mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn ready_probe_reports_database_state() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/ready", server.base_url))
        .send()
        .await?;

    let status = res.status();
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        status
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["timestamp"].is_string(), "probe body must carry a timestamp");

    if status == StatusCode::OK {
        assert_eq!(body["status"], "ready");
    } else {
        assert_eq!(body["status"], "not ready");
    }

    Ok(())
}

#[tokio::test]
async fn root_serves_service_info() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(&server.base_url).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "Loadboard API");
    Ok(())
}
