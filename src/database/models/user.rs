use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    /// ADMIN, SHIPPER or CARRIER; parsed into [`crate::auth::Role`] at the
    /// authentication boundary.
    pub role: String,
    pub created_at: DateTime<Utc>,
}
