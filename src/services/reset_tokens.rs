use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::models::PasswordResetToken;

/// Issue a fresh reset token for the user, replacing any outstanding one.
pub async fn issue(pool: &PgPool, user_id: Uuid) -> Result<PasswordResetToken, sqlx::Error> {
    let token = Uuid::new_v4().to_string();
    let expires_at =
        Utc::now() + Duration::minutes(config::config().security.reset_token_expiry_minutes);

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let row = sqlx::query_as::<_, PasswordResetToken>(
        "INSERT INTO password_reset_tokens (token, user_id, expires_at, created_at) \
         VALUES ($1, $2, $3, now()) RETURNING *",
    )
    .bind(&token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Point lookup with a time-bound predicate. Expired tokens fall out of the
/// WHERE clause, so an expired token and an absent one look identical to the
/// caller.
pub async fn find_valid(
    pool: &PgPool,
    token: &str,
) -> Result<Option<PasswordResetToken>, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetToken>(
        "SELECT * FROM password_reset_tokens WHERE token = $1 AND expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Redeem a valid token: set the user's new password hash and consume the
/// token, atomically. Returns the user id, or None when the token is absent
/// or expired.
pub async fn redeem(
    pool: &PgPool,
    token: &str,
    new_password_hash: &str,
) -> Result<Option<Uuid>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, PasswordResetToken>(
        "SELECT * FROM password_reset_tokens \
         WHERE token = $1 AND expires_at > now() FOR UPDATE",
    )
    .bind(token)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(reset) = row else {
        tx.rollback().await?;
        return Ok(None);
    };

    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(new_password_hash)
        .bind(reset.user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM password_reset_tokens WHERE token = $1")
        .bind(token)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(reset.user_id))
}
