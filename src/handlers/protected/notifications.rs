use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::services::notifications;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let notifications = notifications::list_for_user(state.db.pool(), principal.id).await?;
    Ok(Json(json!({ "notifications": notifications })))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let count = notifications::unread_count(state.db.pool(), principal.id).await?;
    Ok(Json(json!({ "count": count })))
}

/// PATCH /api/notifications/mark-all-read
///
/// Idempotent: a second call with nothing new unread reports updatedCount 0.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let updated = notifications::mark_all_read(state.db.pool(), principal.id).await?;

    Ok(Json(json!({
        "success": true,
        "updatedCount": updated,
        "message": format!("Marked {} notifications as read", updated)
    })))
}
