//! Settings for the authentication cookies.
//!
//! Browser clients cannot attach an `Authorization` header to every request,
//! so login also places the tokens in HttpOnly cookies.
//!
//! - `AUTH_COOKIE_SECURE`: set the `Secure` attribute (default: `true`)
//! - `AUTH_COOKIE_SAME_SITE`: `strict`, `lax` or `none` (default: `lax`)

use std::env;

/// Cookie carrying the access token. Read by the token extractor when no
/// `Authorization` header is present.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl SameSitePolicy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lax" => Some(Self::Lax),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSitePolicy::Lax,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secure: env::var("AUTH_COOKIE_SECURE")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.secure),
            same_site: env::var("AUTH_COOKIE_SAME_SITE")
                .ok()
                .and_then(|v| SameSitePolicy::parse(&v))
                .unwrap_or(defaults.same_site),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_parse() {
        assert_eq!(SameSitePolicy::parse("Strict"), Some(SameSitePolicy::Strict));
        assert_eq!(SameSitePolicy::parse(" none "), Some(SameSitePolicy::None));
        assert_eq!(SameSitePolicy::parse("sideways"), None);
    }

    #[test]
    fn test_default_is_secure_lax() {
        let config = CookieConfig::default();
        assert!(config.secure);
        assert_eq!(config.same_site, SameSitePolicy::Lax);
    }
}
