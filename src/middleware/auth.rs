use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use orderdesk_auth::{AuthenticatedUser, RequestContext, authenticate};
use orderdesk_core::AppError;

use crate::metrics::track_token_rejection;
use crate::state::AppState;

/// The caller's [`RequestContext`]. Never rejects: a missing or bad
/// credential yields an anonymous context.
///
/// The context is cached in request extensions so a handler that extracts
/// both `Identity` and `RequireUser` authenticates only once.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestContext);

impl FromRequestParts<AppState> for Identity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(Identity(ctx.clone()));
        }

        let ctx = authenticate(&parts.headers, &state.jwt_config, &state.db).await;
        if let Some(reason) = ctx.rejection {
            track_token_rejection(reason.as_str());
        }

        parts.extensions.insert(ctx.clone());
        Ok(Identity(ctx))
    }
}

/// An authenticated user, or 401.
///
/// Used for shared reference data, which has no project scope but is not
/// public either.
#[derive(Debug, Clone)]
pub struct RequireUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(Identity(ctx)) = Identity::from_request_parts(parts, state).await;
        ctx.principal
            .user()
            .cloned()
            .map(RequireUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
    }
}
