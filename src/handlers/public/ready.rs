use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::config;
use crate::state::AppState;

/// GET /api/ready - readiness probe, independent of business logic.
///
/// Pings the database with `SELECT 1`. The failure body carries the
/// underlying error only outside production.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "timestamp": timestamp })),
        ),
        Err(e) => {
            tracing::warn!("readiness probe failed: {}", e);

            let mut body = json!({ "status": "not ready", "timestamp": timestamp });
            if !config::config().environment.is_production() {
                body["error"] = json!(e.to_string());
            }

            (StatusCode::SERVICE_UNAVAILABLE, Json(body))
        }
    }
}
