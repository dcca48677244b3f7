//! Token issuing and verification.
//!
//! Tokens are HS256-signed with [`JwtConfig::secret`] and carry the configured
//! issuer. Verification checks signature, expiry (no leeway) and issuer.
//!
//! # Example
//!
//! ```ignore
//! use orderdesk_auth::{create_access_token, decode_claims};
//! use orderdesk_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user.id, &user.username, &config)?;
//! let claims = decode_claims(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use orderdesk_config::JwtConfig;
use orderdesk_core::AppError;

use crate::claims::{Claims, TokenType};

fn issue(
    user_id: i64,
    username: &str,
    token_type: TokenType,
    lifetime_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iss: jwt_config.issuer.clone(),
        token_type,
        exp: (now + lifetime_secs) as usize,
        iat: now as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Issues a short-lived access token.
pub fn create_access_token(
    user_id: i64,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue(
        user_id,
        username,
        TokenType::Access,
        jwt_config.access_token_expiry,
        jwt_config,
    )
}

/// Issues a long-lived refresh token, accepted only by the refresh endpoint.
pub fn create_refresh_token(
    user_id: i64,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue(
        user_id,
        username,
        TokenType::Refresh,
        jwt_config.refresh_token_expiry,
        jwt_config,
    )
}

fn validation(jwt_config: &JwtConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[jwt_config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation
}

/// Decodes and verifies a token of either type.
///
/// The raw `jsonwebtoken` error is returned so callers can classify the
/// failure; request authentication folds it into an `InvalidReason`.
pub fn decode_claims(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(jwt_config),
    )
    .map(|data| data.claims)
}

/// Verifies a refresh token, rejecting access tokens.
///
/// # Errors
///
/// Returns 401 if the token is invalid, expired, or not a refresh token.
pub fn verify_refresh_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let claims = decode_claims(token, jwt_config)
        .map_err(|_| AppError::unauthorized("Invalid or expired refresh token".to_string()))?;

    if claims.token_type != TokenType::Refresh {
        return Err(AppError::unauthorized(
            "Invalid or expired refresh token".to_string(),
        ));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "orderdesk".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = test_config();
        let token = create_access_token(42, "jdoe", &config).unwrap();
        let claims = decode_claims(&token, &config).unwrap();

        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.username, "jdoe");
        assert_eq!(claims.iss, "orderdesk");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tokens_are_unique() {
        let config = test_config();
        let first = create_refresh_token(1, "a", &config).unwrap();
        let second = create_refresh_token(1, "a", &config).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let config = test_config();
        let token = create_access_token(1, "a", &config).unwrap();

        let other = JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            ..test_config()
        };
        let err = decode_claims(&token, &other).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "1".to_string(),
            username: "a".to_string(),
            iss: "orderdesk".to_string(),
            token_type: TokenType::Access,
            exp: now - 60,
            iat: now - 120,
            jti: "j".to_string(),
        };
        let token = encode_raw(&claims, &config.secret);

        let err = decode_claims(&token, &config).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let config = test_config();
        let foreign = JwtConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        };
        let token = create_access_token(1, "a", &foreign).unwrap();
        assert!(decode_claims(&token, &config).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_claims("not.a.token", &test_config()).is_err());
    }

    #[test]
    fn test_verify_refresh_token_accepts_refresh() {
        let config = test_config();
        let token = create_refresh_token(9, "r", &config).unwrap();
        let claims = verify_refresh_token(&token, &config).unwrap();
        assert_eq!(claims.user_id(), Some(9));
    }

    #[test]
    fn test_verify_refresh_token_rejects_access() {
        let config = test_config();
        let token = create_access_token(9, "r", &config).unwrap();
        let err = verify_refresh_token(&token, &config).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
