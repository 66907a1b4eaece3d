use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::carrier::{CarrierError, CarrierIdentifier};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCarrierRequest {
    pub dot_number: Option<String>,
    pub mc_number: Option<String>,
}

/// POST /api/validate-carrier
///
/// Requires a DOT or MC number; exactly one drives the upstream registry
/// call. A registry rejection is a user-correctable 400, a transport failure
/// is an internal fault.
pub async fn validate_carrier(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ValidateCarrierRequest>,
) -> Result<axum::response::Response, ApiError> {
    let Some(identifier) = CarrierIdentifier::from_parts(body.dot_number, body.mc_number) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "valid": false,
                "message": "DOT number or MC number is required"
            })),
        )
            .into_response());
    };

    match state.carrier.validate(&identifier).await {
        Ok(carrier_data) => Ok(Json(json!({
            "message": "Carrier validated successfully",
            "valid": true,
            "carrierData": carrier_data
        }))
        .into_response()),
        Err(CarrierError::Rejected(message)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "valid": false, "message": message })),
        )
            .into_response()),
        Err(CarrierError::Transport(e)) => {
            tracing::error!("carrier validation transport failure: {}", e);
            Err(ApiError::internal(
                "Carrier validation service unavailable",
                e.to_string(),
            ))
        }
    }
}
