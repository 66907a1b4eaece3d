use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    pub const STATUS_PENDING: &'static str = "PENDING";
    pub const STATUS_PAID: &'static str = "PAID";
    pub const STATUS_CANCELLED: &'static str = "CANCELLED";

    pub const PAYMENT_PENDING: &'static str = "PENDING";
    pub const PAYMENT_PAID: &'static str = "PAID";
}
