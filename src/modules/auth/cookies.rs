//! HttpOnly cookies carrying the session tokens.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use orderdesk_config::{ACCESS_TOKEN_COOKIE, CookieConfig, REFRESH_TOKEN_COOKIE, SameSitePolicy};

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    }
}

pub fn token_cookie(
    name: &'static str,
    value: String,
    max_age_secs: i64,
    config: &CookieConfig,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config.same_site))
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

pub fn set_access_cookie(
    jar: CookieJar,
    token: String,
    max_age_secs: i64,
    config: &CookieConfig,
) -> CookieJar {
    jar.add(token_cookie(ACCESS_TOKEN_COOKIE, token, max_age_secs, config))
}

pub fn set_refresh_cookie(
    jar: CookieJar,
    token: String,
    max_age_secs: i64,
    config: &CookieConfig,
) -> CookieJar {
    jar.add(token_cookie(REFRESH_TOKEN_COOKIE, token, max_age_secs, config))
}

/// Overwrites both session cookies with empty, already-expired values.
///
/// Sent unconditionally: `CookieJar::remove` only emits a removal for
/// cookies the request carried.
pub fn clear_session_cookies(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(token_cookie(ACCESS_TOKEN_COOKIE, String::new(), 0, config))
        .add(token_cookie(REFRESH_TOKEN_COOKIE, String::new(), 0, config))
}
