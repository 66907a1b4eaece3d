use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Bid, Shipment};

/// A shipment with its bids nested, newest shipment first.
#[derive(Debug, Serialize)]
pub struct ShipmentWithBids {
    #[serde(flatten)]
    pub shipment: Shipment,
    pub bids: Vec<Bid>,
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Shipment>, sqlx::Error> {
    sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    origin: &str,
    destination: &str,
) -> Result<Shipment, sqlx::Error> {
    sqlx::query_as::<_, Shipment>(
        "INSERT INTO shipments (id, user_id, title, origin, destination, status, payment_status, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .bind(origin)
    .bind(destination)
    .bind(Shipment::STATUS_PENDING)
    .bind(Shipment::PAYMENT_PENDING)
    .fetch_one(pool)
    .await
}

/// Filtered list with nested relation projection: the caller's shipments in
/// descending creation order, each carrying its bids.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ShipmentWithBids>, sqlx::Error> {
    let shipments = sqlx::query_as::<_, Shipment>(
        "SELECT * FROM shipments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    if shipments.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<Uuid> = shipments.iter().map(|s| s.id).collect();
    let bids = sqlx::query_as::<_, Bid>(
        "SELECT * FROM bids WHERE shipment_id = ANY($1) ORDER BY created_at DESC",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    Ok(shipments
        .into_iter()
        .map(|shipment| {
            let bids = bids
                .iter()
                .filter(|b| b.shipment_id == shipment.id)
                .cloned()
                .collect();
            ShipmentWithBids { shipment, bids }
        })
        .collect())
}
