use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::Bid;

/// Flat join row; remapped into the nested wire shape before serialization.
#[derive(Debug, FromRow)]
struct BidShipmentRow {
    id: Uuid,
    amount: Decimal,
    user_id: Uuid,
    shipment_id: Uuid,
    created_at: DateTime<Utc>,
    s_title: String,
    s_origin: String,
    s_destination: String,
    s_status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidWithShipment {
    pub id: Uuid,
    pub amount: Decimal,
    pub user_id: Uuid,
    pub shipment_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub shipment: ShipmentSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub id: Uuid,
    pub title: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
}

/// The caller's bids with their shipment nested, newest first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<BidWithShipment>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BidShipmentRow>(
        "SELECT b.id, b.amount, b.user_id, b.shipment_id, b.created_at, \
                s.title AS s_title, s.origin AS s_origin, \
                s.destination AS s_destination, s.status AS s_status \
         FROM bids b \
         JOIN shipments s ON s.id = b.shipment_id \
         WHERE b.user_id = $1 \
         ORDER BY b.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Bid>, sqlx::Error> {
    sqlx::query_as::<_, Bid>("SELECT * FROM bids WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    shipment_id: Uuid,
    amount: Decimal,
) -> Result<Bid, sqlx::Error> {
    sqlx::query_as::<_, Bid>(
        "INSERT INTO bids (id, amount, user_id, shipment_id, created_at) \
         VALUES ($1, $2, $3, $4, now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(amount)
    .bind(user_id)
    .bind(shipment_id)
    .fetch_one(pool)
    .await
}

impl From<BidShipmentRow> for BidWithShipment {
    fn from(row: BidShipmentRow) -> Self {
        BidWithShipment {
            id: row.id,
            amount: row.amount,
            user_id: row.user_id,
            shipment_id: row.shipment_id,
            created_at: row.created_at,
            shipment: ShipmentSummary {
                id: row.shipment_id,
                title: row.s_title,
                origin: row.s_origin,
                destination: row.s_destination,
                status: row.s_status,
            },
        }
    }
}
