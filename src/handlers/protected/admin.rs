use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::payments::{self, VoidOutcome};
use crate::services::users;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidPaymentRequest {
    pub shipment_id: Option<Uuid>,
}

/// POST /api/admin/payments/void
///
/// Parameterized replacement for the old hand-edited remediation scripts:
/// void the shipment's payments and restore its pre-payment status in one
/// transaction. Re-running is harmless.
pub async fn void_payments(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VoidPaymentRequest>,
) -> Result<Json<VoidOutcome>, ApiError> {
    let shipment_id = body
        .shipment_id
        .ok_or_else(|| ApiError::bad_request("shipmentId is required"))?;

    let outcome = payments::void_for_shipment(state.db.pool(), shipment_id)
        .await?
        .ok_or_else(|| ApiError::not_found_or_expired("Shipment not found"))?;

    info!(
        "voided {} payment(s) for shipment {}",
        outcome.voided_count, outcome.shipment_id
    );
    Ok(Json(outcome))
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let total_users = users::count(state.db.pool()).await?;
    Ok(Json(json!({ "totalUsers": total_users })))
}
