use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use orderdesk_config::RateLimitConfig;
use tower_governor::GovernorLayer;

use crate::state::AppState;

use super::controller::{auth_status, login, logout, refresh};

/// Session routes. Login and refresh share one per-IP limiter.
pub fn init_auth_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let limited = Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .layer(GovernorLayer::new(Arc::new(
            rate_limit.auth_governor_config(),
        )));

    Router::new()
        .route("/logout", post(logout))
        .route("/auth-status", get(auth_status))
        .merge(limited)
}
