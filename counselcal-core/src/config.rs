//! Global counselcal configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::constants::DEFAULT_TZ_OFFSET_HOURS;
use crate::error::{ScheduleError, ScheduleResult};

/// Environment override for the proxy URL, for ad-hoc use without a config file.
pub const PROXY_URL_ENV: &str = "COUNSELCAL_PROXY_URL";

fn default_tz_offset() -> i64 {
    DEFAULT_TZ_OFFSET_HOURS
}

/// Global configuration at ~/.config/counselcal/config.toml
#[derive(Deserialize, Clone)]
pub struct Config {
    /// URL of the proxy forwarding to the Apps Script endpoint.
    #[serde(default)]
    pub proxy_url: String,

    /// UTC offset in hours applied to spreadsheet time-only serials.
    #[serde(default = "default_tz_offset")]
    pub tz_offset_hours: i64,
}

impl Config {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("counselcal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> ScheduleResult<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                ScheduleError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            toml::from_str(&raw)
                .map_err(|e| ScheduleError::Config(format!("Invalid config: {e}")))?
        } else {
            Config {
                proxy_url: String::new(),
                tz_offset_hours: DEFAULT_TZ_OFFSET_HOURS,
            }
        };

        if let Ok(url) = std::env::var(PROXY_URL_ENV) {
            config.proxy_url = url;
        }

        if config.proxy_url.is_empty() {
            return Err(ScheduleError::Config(format!(
                "No proxy URL configured. Set {} or add proxy_url to {}",
                PROXY_URL_ENV,
                path.display()
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tz_offset_defaults_when_absent() {
        let config: Config = toml::from_str("proxy_url = \"https://example.com/api\"").unwrap();
        assert_eq!(config.tz_offset_hours, 9);
        assert_eq!(config.proxy_url, "https://example.com/api");
    }

    #[test]
    fn test_tz_offset_overridable() {
        let config: Config =
            toml::from_str("proxy_url = \"https://example.com\"\ntz_offset_hours = 0").unwrap();
        assert_eq!(config.tz_offset_hours, 0);
    }
}
