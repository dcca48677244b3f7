//! Credential extraction from request headers.
//!
//! API clients send `Authorization: Bearer <token>`. Browser clients rely on
//! the HttpOnly `access_token` cookie set at login. The header always wins:
//! once an `Authorization` header is present the cookie is never read, even
//! when the header carries no usable token.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::CookieJar;

use orderdesk_config::ACCESS_TOKEN_COOKIE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Header,
    Cookie,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

/// An unverified token string and where it came from.
#[derive(Clone, PartialEq, Eq)]
pub struct RawCredential {
    pub raw: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for RawCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawCredential")
            .field("raw", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Pulls the bearer credential out of a request, or `None` if there is none.
pub fn extract_credential(headers: &HeaderMap) -> Option<RawCredential> {
    match headers.get(AUTHORIZATION) {
        Some(value) => {
            let raw = bearer_token(value.to_str().ok()?)?;
            Some(RawCredential {
                raw: raw.to_string(),
                source: CredentialSource::Header,
            })
        }
        None => {
            let jar = CookieJar::from_headers(headers);
            let cookie = jar.get(ACCESS_TOKEN_COOKIE)?;
            let raw = cookie.value().trim();
            if raw.is_empty() {
                return None;
            }
            Some(RawCredential {
                raw: raw.to_string(),
                source: CredentialSource::Cookie,
            })
        }
    }
}

/// `Bearer <token>` with exactly two parts; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum::http::header::COOKIE;

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_no_sources_is_absent() {
        assert_eq!(extract_credential(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_header() {
        let map = headers(&[(AUTHORIZATION, "Bearer abc.def.ghi")]);
        let credential = extract_credential(&map).unwrap();
        assert_eq!(credential.raw, "abc.def.ghi");
        assert_eq!(credential.source, CredentialSource::Header);
    }

    #[test]
    fn test_bearer_scheme_case_insensitive() {
        let map = headers(&[(AUTHORIZATION, "bearer tok")]);
        assert_eq!(extract_credential(&map).unwrap().raw, "tok");
    }

    #[test]
    fn test_cookie_fallback_when_header_missing() {
        let map = headers(&[(COOKIE, "theme=dark; access_token=cookie.tok.en")]);
        let credential = extract_credential(&map).unwrap();
        assert_eq!(credential.raw, "cookie.tok.en");
        assert_eq!(credential.source, CredentialSource::Cookie);
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let map = headers(&[
            (AUTHORIZATION, "Bearer header-token"),
            (COOKIE, "access_token=cookie-token"),
        ]);
        let credential = extract_credential(&map).unwrap();
        assert_eq!(credential.raw, "header-token");
        assert_eq!(credential.source, CredentialSource::Header);
    }

    #[test]
    fn test_malformed_header_does_not_fall_back_to_cookie() {
        for bad in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer a b", ""] {
            let map = headers(&[(AUTHORIZATION, bad), (COOKIE, "access_token=cookie-token")]);
            assert_eq!(extract_credential(&map), None, "header {bad:?}");
        }
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let map = headers(&[(COOKIE, "access_token=")]);
        assert_eq!(extract_credential(&map), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = RawCredential {
            raw: "secret-token".to_string(),
            source: CredentialSource::Header,
        };
        assert!(!format!("{credential:?}").contains("secret-token"));
    }
}
