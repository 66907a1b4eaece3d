use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::Bid;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::{bids, notifications, shipments};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaceBidRequest {
    pub amount: Option<Decimal>,
}

/// GET /api/user/bids - the caller's bids with their shipment nested.
pub async fn list_user_bids(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let bids = bids::list_for_user(state.db.pool(), principal.id).await?;
    Ok(Json(json!({ "bids": bids })))
}

/// POST /api/shipments/:id/bids
pub async fn place_bid(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(shipment_id): Path<Uuid>,
    ApiJson(body): ApiJson<PlaceBidRequest>,
) -> Result<Json<Bid>, ApiError> {
    let amount = match body.amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        Some(_) => return Err(ApiError::bad_request("Bid amount must be positive")),
        None => return Err(ApiError::bad_request("Bid amount is required")),
    };

    let pool = state.db.pool();
    let shipment = shipments::find_by_id(pool, shipment_id)
        .await?
        .ok_or_else(|| ApiError::not_found_or_expired("Shipment not found"))?;

    if shipment.user_id == principal.id {
        return Err(ApiError::bad_request("Cannot bid on your own shipment"));
    }

    let bid = bids::create(pool, principal.id, shipment_id, amount).await?;

    notifications::notify(
        pool,
        shipment.user_id,
        "New bid received",
        &format!("A carrier bid {} on \"{}\"", amount, shipment.title),
    )
    .await?;

    Ok(Json(bid))
}
