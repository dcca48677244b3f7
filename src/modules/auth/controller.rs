use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use orderdesk_config::REFRESH_TOKEN_COOKIE;
use orderdesk_core::AppError;
use orderdesk_models::{
    AuthStatusResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
};

use super::cookies::{clear_session_cookies, set_access_cookie, set_refresh_cookie};
use super::service::AuthService;
use crate::middleware::auth::Identity;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens issued and set as HttpOnly cookies", body = LoginResponse),
        (status = 401, description = "Invalid username or password"),
        (status = 422, description = "Validation failed"),
        (status = 429, description = "Too many attempts")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;

    let jar = set_access_cookie(
        jar,
        response.access_token.clone(),
        state.jwt_config.access_token_expiry,
        &state.cookie_config,
    );
    let jar = set_refresh_cookie(
        jar,
        response.refresh_token.clone(),
        state.jwt_config.refresh_token_expiry,
        &state.cookie_config,
    );

    Ok((jar, Json(response)))
}

/// Exchange a refresh token for a new access token
///
/// The token is read from the JSON body, or from the `refresh_token` cookie
/// when the body does not carry one.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body(content = RefreshTokenRequest, description = "Optional when the refresh_token cookie is set"),
    responses(
        (status = 200, description = "New access token issued", body = RefreshTokenResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Missing, invalid or expired refresh token"),
        (status = 429, description = "Too many attempts")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<RefreshTokenResponse>), AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        RefreshTokenRequest::default()
    } else {
        serde_json::from_slice::<RefreshTokenRequest>(&body)
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid request body: {}", e)))?
    };

    let token = request
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| {
            jar.get(REFRESH_TOKEN_COOKIE)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty())
        })
        .ok_or_else(|| AppError::unauthorized("Refresh token required".to_string()))?;

    let response = AuthService::refresh(&token, &state.jwt_config, &state.db).await?;
    let jar = set_access_cookie(
        jar,
        response.access_token.clone(),
        state.jwt_config.access_token_expiry,
        &state.cookie_config,
    );

    Ok((jar, Json(response)))
}

/// Clear the session cookies
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cookies expired")),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        clear_session_cookies(jar, &state.cookie_config),
        StatusCode::NO_CONTENT,
    )
}

/// Who is calling
#[utoipa::path(
    get,
    path = "/api/auth/auth-status",
    responses(
        (status = 200, description = "The signed-in user, or null for anonymous callers", body = AuthStatusResponse)
    ),
    tag = "Authentication",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip_all)]
pub async fn auth_status(Identity(ctx): Identity) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        user: ctx.user().cloned(),
    })
}
