use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::navigation::DEFAULT_NARROW_WIDTH;
use crate::notification::DEFAULT_DISMISS_AFTER;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/";

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    /// Directory holding the persisted session
    pub data_dir: PathBuf,
    pub notification_dismiss: Duration,
    pub narrow_viewport_width: u32,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            notification_dismiss: DEFAULT_DISMISS_AFTER,
            narrow_viewport_width: DEFAULT_NARROW_WIDTH,
            http_timeout: Duration::from_secs(15),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let notification_ms: u64 = match lookup("COMITE_NOTIFICATION_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("COMITE_NOTIFICATION_MS must be a number of milliseconds")?,
            None => defaults.notification_dismiss.as_millis() as u64,
        };
        let narrow_viewport_width = match lookup("COMITE_NARROW_VIEWPORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("COMITE_NARROW_VIEWPORT must be a width in pixels")?,
            None => defaults.narrow_viewport_width,
        };
        let timeout_secs: u64 = match lookup("COMITE_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("COMITE_HTTP_TIMEOUT_SECS must be a number of seconds")?,
            None => defaults.http_timeout.as_secs(),
        };

        Ok(Self {
            api_url: lookup("COMITE_API_URL").unwrap_or(defaults.api_url),
            data_dir: lookup("COMITE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            notification_dismiss: Duration::from_millis(notification_ms),
            narrow_viewport_width,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("comite");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.notification_dismiss, Duration::from_secs(3));
        assert_eq!(config.narrow_viewport_width, 768);
        assert!(config.data_dir.ends_with("comite"));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("COMITE_API_URL", "https://api.example.org/"),
            ("COMITE_DATA_DIR", "/tmp/comite-test"),
            ("COMITE_NOTIFICATION_MS", "1500"),
            ("COMITE_NARROW_VIEWPORT", "600"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.org/");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/comite-test"));
        assert_eq!(config.notification_dismiss, Duration::from_millis(1500));
        assert_eq!(config.narrow_viewport_width, 600);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = ClientConfig::from_lookup(lookup_from(&[("COMITE_NOTIFICATION_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("COMITE_NOTIFICATION_MS"));
    }
}
