//! JWT claim structures.
//!
//! Access and refresh tokens share one claim layout and are told apart by
//! [`TokenType`], so a refresh token presented as a bearer credential can be
//! rejected instead of silently authenticating the request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim), stringified per RFC 7519
    pub sub: String,
    pub username: String,
    pub iss: String,
    pub token_type: TokenType,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Numeric user id carried in `sub`, if it parses.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_serializes_lowercase() {
        let claims = Claims {
            sub: "42".to_string(),
            username: "jdoe".to_string(),
            iss: "orderdesk".to_string(),
            token_type: TokenType::Refresh,
            exp: 1234567890,
            iat: 1234567800,
            jti: "abc".to_string(),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""token_type":"refresh""#));
        assert!(serialized.contains(r#""sub":"42""#));
    }

    #[test]
    fn test_user_id_parses_numeric_subject() {
        let json = r#"{"sub":"7","username":"a","iss":"x","token_type":"access","exp":1,"iat":0,"jti":"j"}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_user_id_rejects_non_numeric_subject() {
        let json = r#"{"sub":"not-a-number","username":"a","iss":"x","token_type":"access","exp":1,"iat":0,"jti":"j"}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.user_id(), None);
    }
}
