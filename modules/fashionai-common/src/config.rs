use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FashionAiError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Storefront backend
    pub storefront_api_url: String,

    // Compositing service
    pub mockup_api_url: String,
    pub mockup_api_key: Option<String>,

    // Image generation
    pub imagegen_worker_url: Option<String>,

    // Product catalog override
    pub product_catalog_path: Option<PathBuf>,

    // Composition retry
    pub compose_max_attempts: u32,
    pub compose_backoff_base: Duration,

    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, FashionAiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FashionAiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    FashionAiError::Config(format!("{key} environment variable is required"))
                })
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let compose_max_attempts: u32 = parsed(&lookup, "COMPOSE_MAX_ATTEMPTS", 3)?;
        if compose_max_attempts == 0 {
            return Err(FashionAiError::Config(
                "COMPOSE_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            storefront_api_url: required("STOREFRONT_API_URL")?,
            mockup_api_url: optional("MOCKUP_API_URL")
                .unwrap_or_else(|| "https://app.dynamicmockups.com/api/v1".to_string()),
            mockup_api_key: optional("MOCKUP_API_KEY"),
            imagegen_worker_url: optional("IMAGEGEN_WORKER_URL"),
            product_catalog_path: optional("PRODUCT_CATALOG_PATH").map(PathBuf::from),
            compose_max_attempts,
            compose_backoff_base: Duration::from_secs(parsed(
                &lookup,
                "COMPOSE_BACKOFF_BASE_SECS",
                2,
            )?),
            http_timeout: Duration::from_secs(parsed(&lookup, "HTTP_TIMEOUT_SECS", 60)?),
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, FashionAiError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| FashionAiError::Config(format!("{key} must be a number, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config = Config::from_lookup(lookup(&[
            ("STOREFRONT_API_URL", "http://localhost:8000/api"),
            ("MOCKUP_API_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(config.mockup_api_url, "https://app.dynamicmockups.com/api/v1");
        assert_eq!(config.compose_max_attempts, 3);
        assert_eq!(config.compose_backoff_base, Duration::from_secs(2));
        assert_eq!(config.http_timeout, Duration::from_secs(60));
        assert!(config.imagegen_worker_url.is_none());
    }

    #[test]
    fn storefront_url_alone_is_enough() {
        let config =
            Config::from_lookup(lookup(&[("STOREFRONT_API_URL", "http://localhost:8000/api")]))
                .unwrap();

        assert_eq!(config.storefront_api_url, "http://localhost:8000/api");
        assert!(config.mockup_api_key.is_none());
        assert!(config.imagegen_worker_url.is_none());
    }

    #[test]
    fn blank_optional_keys_count_as_absent() {
        let config = Config::from_lookup(lookup(&[
            ("STOREFRONT_API_URL", "http://x"),
            ("MOCKUP_API_URL", "  "),
            ("MOCKUP_API_KEY", ""),
            ("PRODUCT_CATALOG_PATH", ""),
        ]))
        .unwrap();

        assert_eq!(config.mockup_api_url, "https://app.dynamicmockups.com/api/v1");
        assert!(config.mockup_api_key.is_none());
        assert!(config.product_catalog_path.is_none());
    }

    #[test]
    fn missing_required_key_is_named() {
        let err = Config::from_lookup(lookup(&[("MOCKUP_API_KEY", "key")])).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_API_URL"));
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("STOREFRONT_API_URL", "http://x"),
            ("MOCKUP_API_KEY", "key"),
            ("COMPOSE_MAX_ATTEMPTS", "three"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("COMPOSE_MAX_ATTEMPTS"));
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("STOREFRONT_API_URL", "http://x"),
            ("MOCKUP_API_KEY", "key"),
            ("COMPOSE_MAX_ATTEMPTS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, FashionAiError::Config(_)));
    }
}
