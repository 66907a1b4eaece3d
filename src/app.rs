use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::{require_admin, require_session};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/ready", get(public::ready::ready))
        .merge(auth_routes())
        .merge(carrier_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/verify-reset-token", post(auth::verify_reset_token))
        .route("/api/auth/reset-password", post(auth::reset_password))
}

fn carrier_routes() -> Router<AppState> {
    Router::new().route("/api/validate-carrier", post(public::carrier::validate_carrier))
}

fn user_routes() -> Router<AppState> {
    use protected::{bids, notifications, payments, shipments};

    Router::new()
        .route("/api/user/bids", get(bids::list_user_bids))
        .route("/api/user/shipments", get(shipments::list_user_shipments))
        .route("/api/shipments", post(shipments::create_shipment))
        .route("/api/shipments/:id/bids", post(bids::place_bid))
        .route("/api/payments", get(payments::list_payments).post(payments::create_payment))
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/unread-count", get(notifications::unread_count))
        .route("/api/notifications/mark-all-read", patch(notifications::mark_all_read))
        // Session check runs before any handler; without it nothing below
        // ever touches the data layer.
        .route_layer(middleware::from_fn(require_session))
}

fn admin_routes() -> Router<AppState> {
    use protected::admin;

    Router::new()
        .route("/api/admin/payments/void", post(admin::void_payments))
        .route("/api/admin/stats", get(admin::stats))
        .route_layer(middleware::from_fn(require_admin))
}

async fn root() -> axum::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::Json(json!({
        "name": "Loadboard API",
        "version": version,
        "description": "Freight marketplace backend built with Rust (Axum)",
        "endpoints": {
            "ready": "/api/ready (public)",
            "auth": "/api/auth/* (public - registration, login, password reset)",
            "carrier": "/api/validate-carrier (public)",
            "user": "/api/user/*, /api/shipments, /api/payments, /api/notifications/* (session)",
            "admin": "/api/admin/* (admin session)",
        }
    }))
}
