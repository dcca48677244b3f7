//! Per-request identity.
//!
//! A [`RequestContext`] is built once per request by [`crate::authenticate`]
//! and handed explicitly to every service that makes an access decision.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::token::CredentialSource;
use crate::validator::InvalidReason;

/// The user behind a valid credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(AuthenticatedUser),
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::User(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user().map(|u| u.id)
    }
}

/// A verified credential. Never persisted; lives as long as the request.
#[derive(Clone)]
pub struct Credential {
    pub raw: String,
    pub source: CredentialSource,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("raw", &"<redacted>")
            .field("source", &self.source)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub principal: Principal,
    pub credential: Option<Credential>,
    /// Why a presented credential was not accepted. Observability only;
    /// access decisions look at `principal` alone.
    pub rejection: Option<InvalidReason>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self {
            principal: Principal::Anonymous,
            credential: None,
            rejection: None,
        }
    }

    pub fn rejected(reason: InvalidReason) -> Self {
        Self {
            principal: Principal::Anonymous,
            credential: None,
            rejection: Some(reason),
        }
    }

    pub fn authenticated(user: AuthenticatedUser, credential: Credential) -> Self {
        Self {
            principal: Principal::User(user),
            credential: Some(credential),
            rejection: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_authenticated()
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.principal.user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_user() {
        let ctx = RequestContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.principal.user_id(), None);
        assert!(ctx.rejection.is_none());
    }

    #[test]
    fn test_rejected_is_anonymous_with_reason() {
        let ctx = RequestContext::rejected(InvalidReason::Expired);
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.rejection, Some(InvalidReason::Expired));
    }
}
