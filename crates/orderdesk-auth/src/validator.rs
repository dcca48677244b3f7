//! Token validation.
//!
//! Validation never fails with an error. Every fault (bad signature,
//! expiry, unknown or inactive subject, even a failed user lookup) comes back
//! as [`ValidationOutcome::Invalid`] with a reason, and the adapter folds all
//! of them into an anonymous request.

use std::fmt;
use std::future::Future;

use chrono::DateTime;
use jsonwebtoken::errors::ErrorKind;
use sqlx::{FromRow, PgPool};
use tracing::{error, instrument};

use orderdesk_config::JwtConfig;
use orderdesk_core::AppError;

use crate::claims::TokenType;
use crate::jwt::decode_claims;
use crate::principal::{AuthenticatedUser, Credential};
use crate::token::RawCredential;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Malformed,
    Expired,
    BadSignature,
    WrongTokenType,
    UnknownSubject,
    InactiveSubject,
    LookupFailed,
}

impl InvalidReason {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::BadSignature => "bad_signature",
            Self::WrongTokenType => "wrong_token_type",
            Self::UnknownSubject => "unknown_subject",
            Self::InactiveSubject => "inactive_subject",
            Self::LookupFailed => "lookup_failed",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&jsonwebtoken::errors::Error> for InvalidReason {
    fn from(err: &jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Valid {
        user: AuthenticatedUser,
        credential: Credential,
    },
    Invalid(InvalidReason),
}

/// A user row as needed to resolve a token subject.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
}

impl From<UserRecord> for AuthenticatedUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            is_staff: record.is_staff,
        }
    }
}

/// Resolves token subjects to users.
pub trait PrincipalDirectory: Send + Sync {
    fn find_user(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<UserRecord>, AppError>> + Send;
}

impl PrincipalDirectory for PgPool {
    async fn find_user(&self, id: i64) -> Result<Option<UserRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, first_name, last_name, is_active, is_staff
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(record)
    }
}

/// Verifies `credential` and resolves its subject.
#[instrument(skip_all, fields(source = credential.source.as_str()))]
pub async fn validate_token<D: PrincipalDirectory>(
    credential: RawCredential,
    jwt_config: &JwtConfig,
    directory: &D,
) -> ValidationOutcome {
    let claims = match decode_claims(&credential.raw, jwt_config) {
        Ok(claims) => claims,
        Err(e) => return ValidationOutcome::Invalid(InvalidReason::from(&e)),
    };

    if claims.token_type != TokenType::Access {
        return ValidationOutcome::Invalid(InvalidReason::WrongTokenType);
    }

    let Some(user_id) = claims.user_id() else {
        return ValidationOutcome::Invalid(InvalidReason::Malformed);
    };
    let Some(expires_at) = DateTime::from_timestamp(claims.exp as i64, 0) else {
        return ValidationOutcome::Invalid(InvalidReason::Malformed);
    };

    let record = match directory.find_user(user_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return ValidationOutcome::Invalid(InvalidReason::UnknownSubject),
        Err(e) => {
            error!(user_id, error = %e.message(), "Failed to resolve token subject");
            return ValidationOutcome::Invalid(InvalidReason::LookupFailed);
        }
    };

    if !record.is_active {
        return ValidationOutcome::Invalid(InvalidReason::InactiveSubject);
    }

    ValidationOutcome::Valid {
        user: record.into(),
        credential: Credential {
            raw: credential.raw,
            source: credential.source,
            expires_at,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::{create_access_token, create_refresh_token};
    use crate::test_support::{InMemoryDirectory, test_jwt_config, user_record};
    use crate::token::CredentialSource;

    fn cookie(raw: &str) -> RawCredential {
        RawCredential {
            raw: raw.to_string(),
            source: CredentialSource::Cookie,
        }
    }

    fn reason(outcome: ValidationOutcome) -> InvalidReason {
        match outcome {
            ValidationOutcome::Invalid(reason) => reason,
            ValidationOutcome::Valid { user, .. } => panic!("unexpected user {}", user.id),
        }
    }

    #[tokio::test]
    async fn test_valid_token_keeps_source_and_expiry() {
        let config = test_jwt_config();
        let directory = InMemoryDirectory::with_users(vec![user_record(3, "carol", true)]);
        let token = create_access_token(3, "carol", &config).unwrap();

        match validate_token(cookie(&token), &config, &directory).await {
            ValidationOutcome::Valid { user, credential } => {
                assert_eq!(user.username, "carol");
                assert_eq!(credential.source, CredentialSource::Cookie);
                assert!(credential.expires_at > chrono::Utc::now());
            }
            ValidationOutcome::Invalid(reason) => panic!("rejected: {reason}"),
        }
        assert_eq!(directory.lookups(), 1);
    }

    #[tokio::test]
    async fn test_foreign_secret_is_bad_signature() {
        let mut other = test_jwt_config();
        other.secret = "another-secret-key-at-least-32-characters".to_string();
        let token = create_access_token(3, "carol", &other).unwrap();
        let directory = InMemoryDirectory::with_users(vec![user_record(3, "carol", true)]);

        let outcome = validate_token(cookie(&token), &test_jwt_config(), &directory).await;
        assert_eq!(reason(outcome), InvalidReason::BadSignature);
        assert_eq!(directory.lookups(), 0);
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_before_lookup() {
        let config = test_jwt_config();
        let token = create_refresh_token(3, "carol", &config).unwrap();
        let directory = InMemoryDirectory::with_users(vec![user_record(3, "carol", true)]);

        let outcome = validate_token(cookie(&token), &config, &directory).await;
        assert_eq!(reason(outcome), InvalidReason::WrongTokenType);
        assert_eq!(directory.lookups(), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_a_reason() {
        let config = test_jwt_config();
        let token = create_access_token(3, "carol", &config).unwrap();

        let outcome = validate_token(cookie(&token), &config, &InMemoryDirectory::failing()).await;
        assert_eq!(reason(outcome), InvalidReason::LookupFailed);
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(InvalidReason::InactiveSubject.as_str(), "inactive_subject");
        assert_eq!(InvalidReason::Expired.to_string(), "expired");
    }
}
