//! CORS configuration.
//!
//! Browser clients authenticate with the `access_token` cookie, so the CORS
//! layer must allow credentials and therefore needs an explicit origin list
//! (`ALLOWED_ORIGINS`, comma separated) rather than a wildcard.

use std::env;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        Self {
            allowed_origins: parse_origins(&raw),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty() && s != "*")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        let origins = parse_origins(" http://a.test/ ,, http://b.test");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_parse_origins_rejects_wildcard() {
        assert!(parse_origins("*").is_empty());
    }

    #[test]
    fn test_default_origins() {
        assert_eq!(parse_origins(DEFAULT_ORIGINS).len(), 2);
    }
}
