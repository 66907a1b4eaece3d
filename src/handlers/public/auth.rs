use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::{self, Claims, Role};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::services::{reset_tokens, users};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// "shipper" or "carrier"; admins are never created through the API.
    pub user_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyResetTokenRequest {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let email = required_email(body.email)?;
    let password = required_password(body.password)?;
    let name = body
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Name is required"))?;

    let role = match body.user_type.as_deref() {
        Some("shipper") | None => Role::Shipper,
        Some("carrier") => Role::Carrier,
        Some(other) => {
            return Err(ApiError::bad_request(format!("Unknown user type: {}", other)))
        }
    };

    let pool = state.db.pool();
    if users::find_by_email(pool, &email).await?.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = auth::hash_password(&password)
        .map_err(|e| ApiError::internal("Failed to create account", e.to_string()))?;

    let user = users::create(pool, &email, &password_hash, &name, role).await?;
    info!("registered {} user {}", role.as_str(), user.id);

    session_response(user.id, role, user.email, user.name)
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let email = required_email(body.email)?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Password is required"))?;

    let user = users::find_by_email(state.db.pool(), &email).await?;

    // Same rejection for unknown email and wrong password
    let user = match user {
        Some(user) if auth::verify_password(&password, &user.password_hash) => user,
        _ => return Err(ApiError::unauthorized("Invalid email or password")),
    };

    let role = Role::parse(&user.role)
        .ok_or_else(|| ApiError::internal("Account is misconfigured", format!("unknown role: {}", user.role)))?;

    session_response(user.id, role, user.email, user.name)
}

/// POST /api/auth/forgot-password
///
/// Answers identically whether or not the address has an account, so the
/// endpoint cannot be used to enumerate users.
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ForgotPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required_email(body.email)?;
    let pool = state.db.pool();

    if let Some(user) = users::find_by_email(pool, &email).await? {
        let reset = reset_tokens::issue(pool, user.id).await?;

        if let Err(e) = state.email.send_password_reset(&user.email, &reset.token).await {
            // Logged but not surfaced; the uniform reply below still stands.
            error!("failed to send password reset email to {}: {}", user.email, e);
        }
    }

    Ok(Json(json!({
        "message": "If that email is registered, a reset link has been sent"
    })))
}

/// POST /api/auth/verify-reset-token
pub async fn verify_reset_token(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VerifyResetTokenRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = required_token(body.token)?;

    let pool = state.db.pool();
    let reset = reset_tokens::find_valid(pool, &token)
        .await?
        .ok_or_else(|| ApiError::not_found_or_expired("Invalid or expired reset token"))?;

    let user = users::find_by_id(pool, reset.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found_or_expired("Invalid or expired reset token"))?;

    Ok(Json(json!({
        "message": "Token is valid",
        "user": { "id": user.id, "email": user.email }
    })))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResetPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let token = required_token(body.token)?;
    let password = required_password(body.password)?;

    let password_hash = auth::hash_password(&password)
        .map_err(|e| ApiError::internal("Failed to reset password", e.to_string()))?;

    let user_id = reset_tokens::redeem(state.db.pool(), &token, &password_hash)
        .await?
        .ok_or_else(|| ApiError::not_found_or_expired("Invalid or expired reset token"))?;

    info!("password reset completed for user {}", user_id);
    Ok(Json(json!({ "message": "Password has been reset" })))
}

fn session_response(
    id: Uuid,
    role: Role,
    email: String,
    name: String,
) -> Result<Json<SessionResponse>, ApiError> {
    let claims = Claims::new(id, role, email.clone());
    let token = auth::generate_token(&claims)
        .map_err(|e| ApiError::internal("Failed to create session", e.to_string()))?;

    Ok(Json(SessionResponse {
        token,
        user: SessionUser { id, email, name, role: role.as_str().to_string() },
    }))
}

fn required_email(email: Option<String>) -> Result<String, ApiError> {
    let email = email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    if !email.contains('@') {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    Ok(email)
}

fn required_password(password: Option<String>) -> Result<String, ApiError> {
    match password {
        Some(p) if p.len() >= 8 => Ok(p),
        Some(_) => Err(ApiError::bad_request("Password must be at least 8 characters")),
        None => Err(ApiError::bad_request("Password is required")),
    }
}

fn required_token(token: Option<String>) -> Result<String, ApiError> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Reset token is required"))
}
