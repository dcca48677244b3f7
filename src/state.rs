use sqlx::PgPool;

use orderdesk_config::{CookieConfig, CorsConfig, ExportConfig, JwtConfig, RateLimitConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub cookie_config: CookieConfig,
    pub export_config: ExportConfig,
}

impl AppState {
    /// Builds state around an existing pool with every other setting read
    /// from the environment.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            cookie_config: CookieConfig::from_env(),
            export_config: ExportConfig::from_env(),
        }
    }
}
