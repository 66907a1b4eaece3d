use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Notification;

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Count-only aggregation: unread notifications for one user.
pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND \"read\" = false",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Bulk conditional update scoped to one user. Idempotent: the `read = false`
/// predicate means a second run affects zero rows.
pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE notifications SET \"read\" = true WHERE user_id = $1 AND \"read\" = false",
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn notify(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    body: &str,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (id, user_id, title, body, \"read\", created_at) \
         VALUES ($1, $2, $3, $4, false, now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .bind(body)
    .fetch_one(pool)
    .await
}
