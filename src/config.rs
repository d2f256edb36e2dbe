use std::time::Duration;

use anyhow::{Context, Result};

use crate::scraper::anilist::API_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Runtime settings, read from the environment at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub anilist_url: String,
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let upstream_timeout = match lookup("ANILIST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("ANILIST_TIMEOUT_SECS is not a number: {raw:?}"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            bind_addr: lookup("NEWS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            anilist_url: lookup("ANILIST_API_URL").unwrap_or_else(|| API_URL.to_string()),
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.anilist_url, "https://graphql.anilist.co");
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("NEWS_BIND_ADDR", "127.0.0.1:8080"),
            ("ANILIST_API_URL", "http://localhost:9999/graphql"),
            ("ANILIST_TIMEOUT_SECS", " 15 "),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.anilist_url, "http://localhost:9999/graphql");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_bad_timeout() {
        let err = config_from(&[("ANILIST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("ANILIST_TIMEOUT_SECS"));
    }
}
