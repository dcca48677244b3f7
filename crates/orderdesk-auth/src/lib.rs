//! # OrderDesk Auth
//!
//! Establishes the identity behind a request.
//!
//! - [`token`]: Pulls the raw credential from `Authorization` or the `access_token` cookie
//! - [`jwt`]: Issues and verifies HS256 tokens
//! - [`validator`]: Turns a raw credential into a user or an [`InvalidReason`]
//! - [`adapter`]: Composes the above into [`authenticate`]
//! - [`principal`]: The resulting [`RequestContext`]
//!
//! # Example
//!
//! ```ignore
//! use orderdesk_auth::authenticate;
//!
//! let ctx = authenticate(&parts.headers, &state.jwt_config, &state.db).await;
//! if let Some(user) = ctx.user() {
//!     tracing::info!(user_id = user.id, "Authenticated request");
//! }
//! ```

pub mod adapter;
pub mod claims;
pub mod jwt;
pub mod principal;
pub mod token;
pub mod validator;

pub use adapter::authenticate;
pub use claims::{Claims, TokenType};
pub use jwt::{create_access_token, create_refresh_token, decode_claims, verify_refresh_token};
pub use principal::{AuthenticatedUser, Credential, Principal, RequestContext};
pub use token::{CredentialSource, RawCredential, extract_credential};
pub use validator::{
    InvalidReason, PrincipalDirectory, UserRecord, ValidationOutcome, validate_token,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use orderdesk_config::JwtConfig;
    use orderdesk_core::AppError;

    use crate::validator::{PrincipalDirectory, UserRecord};

    pub fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "orderdesk".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    pub fn user_record(id: i64, username: &str, is_active: bool) -> UserRecord {
        UserRecord {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            is_active,
            is_staff: false,
        }
    }

    #[derive(Default)]
    pub struct InMemoryDirectory {
        users: HashMap<i64, UserRecord>,
        fail: bool,
        lookups: AtomicUsize,
    }

    impl InMemoryDirectory {
        pub fn with_users(users: Vec<UserRecord>) -> Self {
            Self {
                users: users.into_iter().map(|u| (u.id, u)).collect(),
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl PrincipalDirectory for InMemoryDirectory {
        async fn find_user(&self, id: i64) -> Result<Option<UserRecord>, AppError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::internal_error("connection refused".to_string()));
            }
            Ok(self.users.get(&id).cloned())
        }
    }
}
