use axum::{extract::State, Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::Payment;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::payments::{self, PaymentWithRelations};
use crate::services::{bids, notifications, shipments};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipment_id: Option<Uuid>,
    pub bid_id: Option<Uuid>,
    pub amount: Option<Decimal>,
}

/// GET /api/payments - the caller's payments with shipment and bid nested.
/// Body is a bare array, matching the historical surface.
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<PaymentWithRelations>>, ApiError> {
    let payments = payments::list_for_user(state.db.pool(), principal.id).await?;
    Ok(Json(payments))
}

/// POST /api/payments - record a checkout and mark the shipment paid.
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(body): ApiJson<CheckoutRequest>,
) -> Result<Json<Payment>, ApiError> {
    let shipment_id = body
        .shipment_id
        .ok_or_else(|| ApiError::bad_request("shipmentId is required"))?;
    let amount = match body.amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        Some(_) => return Err(ApiError::bad_request("Amount must be positive")),
        None => return Err(ApiError::bad_request("Amount is required")),
    };

    let pool = state.db.pool();
    let shipment = shipments::find_by_id(pool, shipment_id)
        .await?
        .ok_or_else(|| ApiError::not_found_or_expired("Shipment not found"))?;

    // The payee: the winning bid's carrier when a bid is named, otherwise
    // the shipment owner. The payer never notifies themselves.
    let recipient = match body.bid_id {
        Some(bid_id) => {
            let bid = bids::find_by_id(pool, bid_id)
                .await?
                .ok_or_else(|| ApiError::not_found_or_expired("Bid not found"))?;
            if bid.shipment_id != shipment_id {
                return Err(ApiError::bad_request("Bid does not belong to this shipment"));
            }
            bid.user_id
        }
        None => shipment.user_id,
    };

    let payment =
        payments::record(pool, principal.id, shipment_id, body.bid_id, amount).await?;

    if recipient != principal.id {
        notifications::notify(
            pool,
            recipient,
            "Payment received",
            &format!("Payment of {} received for \"{}\"", amount, shipment.title),
        )
        .await?;
    }

    Ok(Json(payment))
}
