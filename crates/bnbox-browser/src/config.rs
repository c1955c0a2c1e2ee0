//! Scrape settings, loadable from a JSON file.

use crate::{Error, Pacing, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_home_url")]
    pub home_url: String,
    #[serde(default = "default_inbox_url")]
    pub inbox_url: String,
    /// Upper bound for every element wait
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub human_pacing: bool,
    #[serde(default)]
    pub headless: bool,
    #[serde(default = "default_debugging_port")]
    pub debugging_port: u16,
}

fn default_home_url() -> String {
    "https://www.airbnb.co.uk/".into()
}
fn default_inbox_url() -> String {
    "https://www.airbnb.co.uk/guest/messages/".into()
}
fn default_wait_timeout_secs() -> u64 {
    10
}
fn default_true() -> bool {
    true
}
fn default_debugging_port() -> u16 {
    crate::launcher::DEFAULT_DEBUGGING_PORT
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            inbox_url: default_inbox_url(),
            wait_timeout_secs: default_wait_timeout_secs(),
            human_pacing: true,
            headless: false,
            debugging_port: default_debugging_port(),
        }
    }
}

impl ScrapeConfig {
    /// Load settings from a JSON file. Fields the file leaves out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded scrape config from {}", path.display());
        Ok(config)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn pacing(&self) -> Pacing {
        if self.human_pacing {
            Pacing::human()
        } else {
            Pacing::disabled()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bnbox.json");
        std::fs::write(&path, r#"{"wait_timeout_secs": 3, "human_pacing": false}"#).unwrap();

        let config = ScrapeConfig::from_file(&path).unwrap();

        assert_eq!(config.wait_timeout(), Duration::from_secs(3));
        assert_eq!(config.pacing(), Pacing::disabled());
        assert_eq!(config.inbox_url, "https://www.airbnb.co.uk/guest/messages/");
        assert_eq!(config.debugging_port, 9222);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ScrapeConfig::from_file(Path::new("/nonexistent/bnbox.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bnbox.json");
        std::fs::write(&path, "not json").unwrap();

        let err = ScrapeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("bnbox.json"));
    }
}
