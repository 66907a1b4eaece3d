use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::models::{Payment, Shipment};

#[derive(Debug, FromRow)]
struct PaymentRow {
    id: Uuid,
    amount: Decimal,
    user_id: Uuid,
    shipment_id: Uuid,
    bid_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    s_title: String,
    s_origin: String,
    s_destination: String,
    s_status: String,
    s_payment_status: String,
    b_amount: Option<Decimal>,
    b_user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithRelations {
    pub id: Uuid,
    pub amount: Decimal,
    pub user_id: Uuid,
    pub shipment_id: Uuid,
    pub bid_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub shipment: PaymentShipment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<PaymentBid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentShipment {
    pub id: Uuid,
    pub title: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub payment_status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBid {
    pub id: Uuid,
    pub amount: Decimal,
    pub user_id: Uuid,
}

/// Outcome of the administrative void operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidOutcome {
    pub shipment_id: Uuid,
    pub voided_count: u64,
}

/// The caller's payments with shipment and bid nested, newest first.
/// Voided payments never appear.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PaymentWithRelations>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PaymentRow>(
        "SELECT p.id, p.amount, p.user_id, p.shipment_id, p.bid_id, p.created_at, \
                s.title AS s_title, s.origin AS s_origin, \
                s.destination AS s_destination, s.status AS s_status, \
                s.payment_status AS s_payment_status, \
                b.amount AS b_amount, b.user_id AS b_user_id \
         FROM payments p \
         JOIN shipments s ON s.id = p.shipment_id \
         LEFT JOIN bids b ON b.id = p.bid_id \
         WHERE p.user_id = $1 AND p.voided_at IS NULL \
         ORDER BY p.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Record a checkout: insert the payment and mark the shipment paid, in one
/// transaction.
pub async fn record(
    pool: &PgPool,
    user_id: Uuid,
    shipment_id: Uuid,
    bid_id: Option<Uuid>,
    amount: Decimal,
) -> Result<Payment, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let payment = sqlx::query_as::<_, Payment>(
        "INSERT INTO payments (id, amount, user_id, shipment_id, bid_id, created_at) \
         VALUES ($1, $2, $3, $4, $5, now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(amount)
    .bind(user_id)
    .bind(shipment_id)
    .bind(bid_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE shipments SET status = $1, payment_status = $2 WHERE id = $3")
        .bind(Shipment::STATUS_PAID)
        .bind(Shipment::PAYMENT_PAID)
        .bind(shipment_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(payment)
}

/// Void every outstanding payment for a shipment and reset the shipment to
/// PENDING, as a single transaction. Safe to re-run: a second invocation
/// voids zero rows and leaves the status untouched at PENDING. Returns None
/// when the shipment does not exist.
pub async fn void_for_shipment(
    pool: &PgPool,
    shipment_id: Uuid,
) -> Result<Option<VoidOutcome>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shipments WHERE id = $1")
        .bind(shipment_id)
        .fetch_one(&mut *tx)
        .await?;

    if exists == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let voided = sqlx::query(
        "UPDATE payments SET voided_at = now() \
         WHERE shipment_id = $1 AND voided_at IS NULL",
    )
    .bind(shipment_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    sqlx::query("UPDATE shipments SET status = $1, payment_status = $2 WHERE id = $3")
        .bind(Shipment::STATUS_PENDING)
        .bind(Shipment::PAYMENT_PENDING)
        .bind(shipment_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(VoidOutcome { shipment_id, voided_count: voided }))
}

impl From<PaymentRow> for PaymentWithRelations {
    fn from(row: PaymentRow) -> Self {
        let bid = match (row.bid_id, row.b_amount, row.b_user_id) {
            (Some(id), Some(amount), Some(user_id)) => {
                Some(PaymentBid { id, amount, user_id })
            }
            _ => None,
        };

        PaymentWithRelations {
            id: row.id,
            amount: row.amount,
            user_id: row.user_id,
            shipment_id: row.shipment_id,
            bid_id: row.bid_id,
            created_at: row.created_at,
            shipment: PaymentShipment {
                id: row.shipment_id,
                title: row.s_title,
                origin: row.s_origin,
                destination: row.s_destination,
                status: row.s_status,
                payment_status: row.s_payment_status,
            },
            bid,
        }
    }
}
