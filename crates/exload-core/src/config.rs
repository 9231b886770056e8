use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Site origin that relative listing hrefs and manifest lines are resolved
/// against when no other origin is configured.
pub const DEFAULT_ORIGIN: &str = "http://www.ex.ua";

/// Global configuration loaded from `~/.config/exload/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExloadConfig {
    /// Origin that relative file hrefs are joined against.
    pub origin: String,
    /// TCP connect timeout in seconds, for every transfer.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds for listing and manifest fetches.
    pub fetch_timeout_secs: u64,
    /// Whole-transfer timeout in seconds for file downloads.
    pub download_timeout_secs: u64,
}

impl Default for ExloadConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            connect_timeout_secs: 15,
            fetch_timeout_secs: 60,
            download_timeout_secs: 3600,
        }
    }
}

impl ExloadConfig {
    /// The configured origin as a parsed URL.
    pub fn origin_url(&self) -> Result<url::Url> {
        url::Url::parse(&self.origin)
            .with_context(|| format!("config origin is not a valid URL: {}", self.origin))
    }

    /// Transfer options for the fetch layer.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            download_timeout: Duration::from_secs(self.download_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("exload")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ExloadConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ExloadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ExloadConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ExloadConfig::default();
        assert_eq!(cfg.origin, "http://www.ex.ua");
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.fetch_timeout_secs, 60);
        assert_eq!(cfg.download_timeout_secs, 3600);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ExloadConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ExloadConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.origin, cfg.origin);
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.fetch_timeout_secs, cfg.fetch_timeout_secs);
        assert_eq!(parsed.download_timeout_secs, cfg.download_timeout_secs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            origin = "http://mirror.example"
            connect_timeout_secs = 5
            fetch_timeout_secs = 20
            download_timeout_secs = 600
        "#;
        let cfg: ExloadConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.origin, "http://mirror.example");
        assert_eq!(cfg.connect_timeout_secs, 5);
        assert_eq!(cfg.fetch_timeout_secs, 20);
        assert_eq!(cfg.download_timeout_secs, 600);
    }

    #[test]
    fn origin_url_rejects_garbage() {
        let cfg = ExloadConfig {
            origin: "not a url".to_string(),
            ..ExloadConfig::default()
        };
        assert!(cfg.origin_url().is_err());

        let cfg = ExloadConfig::default();
        assert_eq!(cfg.origin_url().unwrap().as_str(), "http://www.ex.ua/");
    }

    #[test]
    fn fetch_options_map_seconds_to_durations() {
        let cfg = ExloadConfig {
            connect_timeout_secs: 2,
            fetch_timeout_secs: 3,
            download_timeout_secs: 4,
            ..ExloadConfig::default()
        };
        let options = cfg.fetch_options();
        assert_eq!(options.connect_timeout, Duration::from_secs(2));
        assert_eq!(options.fetch_timeout, Duration::from_secs(3));
        assert_eq!(options.download_timeout, Duration::from_secs(4));
    }
}
