use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Principal;
use crate::database::models::Shipment;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::shipments;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    pub title: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// GET /api/user/shipments - the caller's shipments with bids nested.
pub async fn list_user_shipments(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let shipments = shipments::list_for_user(state.db.pool(), principal.id).await?;
    Ok(Json(json!({ "shipments": shipments })))
}

/// POST /api/shipments
pub async fn create_shipment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(body): ApiJson<CreateShipmentRequest>,
) -> Result<Json<Shipment>, ApiError> {
    let title = required(body.title, "Title")?;
    let origin = required(body.origin, "Origin")?;
    let destination = required(body.destination, "Destination")?;

    let shipment =
        shipments::create(state.db.pool(), principal.id, &title, &origin, &destination).await?;

    Ok(Json(shipment))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        assert!(required(None, "Title").is_err());
        assert!(required(Some("  ".into()), "Title").is_err());
        assert_eq!(required(Some(" Chicago ".into()), "Origin").unwrap(), "Chicago");
    }
}
