use orderdesk_auth::{
    AuthenticatedUser, PrincipalDirectory, create_access_token, create_refresh_token,
    verify_refresh_token,
};
use orderdesk_config::JwtConfig;
use orderdesk_core::{AppError, verify_dummy_password, verify_password};
use orderdesk_models::{LoginRequest, LoginResponse, RefreshTokenResponse, User};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::metrics::{track_login_failure, track_login_success, track_token_refreshed};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService;

impl AuthService {
    /// Checks the password and issues an access/refresh token pair.
    ///
    /// Unknown users, inactive users and wrong passwords all produce the
    /// same 401 so the response does not reveal which usernames exist.
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, email, first_name, last_name, password_hash,
                      is_active, is_staff, created_at, updated_at
               FROM users WHERE username = $1"#,
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?;

        let Some(user) = user else {
            verify_dummy_password(&dto.password);
            warn!("Login failed: unknown user");
            track_login_failure("unknown_user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user_id = user.id, "Login failed: wrong password");
            track_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            warn!(user_id = user.id, "Login failed: inactive user");
            track_login_failure("inactive");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = create_access_token(user.id, &user.username, jwt_config)?;
        let refresh_token = create_refresh_token(user.id, &user.username, jwt_config)?;

        info!(user_id = user.id, "User logged in");
        track_login_success();

        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: AuthenticatedUser {
                id: user.id,
                username: user.username,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                is_staff: user.is_staff,
            },
        })
    }

    /// Exchanges a refresh token for a new access token. The subject must
    /// still exist and be active.
    #[instrument(skip_all)]
    pub async fn refresh<D: PrincipalDirectory>(
        refresh_token: &str,
        jwt_config: &JwtConfig,
        directory: &D,
    ) -> Result<RefreshTokenResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let invalid = || AppError::unauthorized("Invalid or expired refresh token".to_string());

        let user_id = claims.user_id().ok_or_else(invalid)?;
        let user = directory
            .find_user(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(invalid)?;

        let access_token = create_access_token(user.id, &user.username, jwt_config)?;
        track_token_refreshed();

        Ok(RefreshTokenResponse { access_token })
    }
}
