//! Client configuration.
//!
//! The base URL is an explicit value handed to the client at construction.
//! Nothing reads the environment at request time.

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "ARENA_API_BASE_URL";

/// Base URL used when the environment does not provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5611/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every endpoint path is appended to, e.g. `http://host/api`.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `ARENA_API_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] with an injectable variable lookup.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_value_wins() {
        let config = ClientConfig::from_lookup(|key| {
            assert_eq!(key, BASE_URL_ENV);
            Some("http://arena.test/api".to_string())
        });
        assert_eq!(config.base_url, "http://arena.test/api");
    }

    #[test]
    fn missing_or_blank_value_falls_back_to_default() {
        assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
        assert_eq!(
            ClientConfig::from_lookup(|_| Some("   ".to_string())).base_url,
            DEFAULT_BASE_URL
        );
    }
}
