//! Session request and response bodies.

use orderdesk_auth::AuthenticatedUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthenticatedUser,
}

/// The refresh token may instead arrive in the `refresh_token` cookie.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// `user` is `null` for anonymous requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthStatusResponse {
    pub user: Option<AuthenticatedUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_status_anonymous_serializes_null() {
        let json = serde_json::to_value(AuthStatusResponse { user: None }).unwrap();
        assert!(json["user"].is_null());
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let empty = LoginRequest {
            username: String::new(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_refresh_request_body_optional() {
        let req: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.refresh_token.is_none());
    }
}
