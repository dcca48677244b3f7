//! # OrderDesk Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT signing configuration
//! - [`cookie`]: Authentication cookie names and attributes
//! - [`cors`]: CORS allowed origins
//! - [`rate_limit`]: Rate limiting for session endpoints
//! - [`export`]: Order CSV export destination
//!
//! # Example
//!
//! ```ignore
//! use orderdesk_config::{JwtConfig, CookieConfig, CorsConfig, ExportConfig, RateLimitConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let export_config = ExportConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod export;
pub mod jwt;
pub mod rate_limit;

pub use cookie::{ACCESS_TOKEN_COOKIE, CookieConfig, REFRESH_TOKEN_COOKIE, SameSitePolicy};
pub use cors::CorsConfig;
pub use export::ExportConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
