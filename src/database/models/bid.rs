use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: Uuid,
    pub amount: Decimal,
    pub user_id: Uuid,
    pub shipment_id: Uuid,
    pub created_at: DateTime<Utc>,
}
