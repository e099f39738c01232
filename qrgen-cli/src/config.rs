// ABOUTME: Configuration file loading, validation, and hierarchical merging for qrgen
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use crate::constants;
use anyhow::{Context, Result, anyhow};
use qrserver_sdk::constants::urls::QRSERVER_API_BASE;
use qrserver_sdk::{QrOptions, Quirks};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub legacy_quirks: Option<bool>,
    #[serde(default)]
    pub show_inline: Option<bool>,
    #[serde(default)]
    pub options: Option<QrOptions>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from file paths, lowest precedence first
    ///
    /// Missing files are skipped; a file that exists but does not parse is an error.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                continue;
            }

            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Get standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(constants::config::APP_DIR)
                    .join(constants::config::CONFIG_FILE),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(config_home)
                    .join(constants::config::APP_DIR)
                    .join(constants::config::CONFIG_FILE),
            );
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(constants::config::PROJECT_FILE));
        }

        paths.dedup();
        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            api_url: other.api_url.or(self.api_url),
            output_dir: other.output_dir.or(self.output_dir),
            legacy_quirks: other.legacy_quirks.or(self.legacy_quirks),
            show_inline: other.show_inline.or(self.show_inline),
            options: match (self.options, other.options) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (base, other) => other.or(base),
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref api_url) = self.api_url {
            validate_api_url(api_url).context("Invalid api_url")?;
        }

        Ok(())
    }

    /// Rendering endpoint: environment, then config, then the public service
    pub fn resolved_api_url(&self) -> Result<String> {
        if let Ok(from_env) = std::env::var(constants::env::API_URL) {
            validate_api_url(&from_env)
                .with_context(|| format!("Invalid {}", constants::env::API_URL))?;
            return Ok(from_env);
        }

        Ok(self
            .api_url
            .clone()
            .unwrap_or_else(|| QRSERVER_API_BASE.to_string()))
    }

    pub fn quirks(&self) -> Quirks {
        Quirks::from_flag(self.legacy_quirks.unwrap_or(false))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn validate_api_url(api_url: &str) -> Result<()> {
    let parsed = Url::parse(api_url).map_err(|e| anyhow!("'{}' is not a URL: {}", api_url, e))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("Unsupported URL scheme '{}': {}", scheme, api_url)),
    }

    if parsed.query().is_some() {
        return Err(anyhow!(
            "'{}' must not contain a query string, options are appended to it",
            api_url
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.options.is_none());
        assert_eq!(config.quirks(), Quirks::default());
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            api_url: Some("https://base.example.com/".to_string()),
            legacy_quirks: Some(true),
            options: Some(QrOptions {
                size: Some(200),
                color: Some("000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let override_config = Config {
            api_url: Some("https://override.example.com/".to_string()),
            output_dir: Some(PathBuf::from("/tmp/codes")),
            options: Some(QrOptions {
                size: Some(300),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(
            merged.api_url,
            Some("https://override.example.com/".to_string())
        );
        assert_eq!(merged.legacy_quirks, Some(true));
        assert_eq!(merged.output_dir, Some(PathBuf::from("/tmp/codes")));

        let options = merged.options.unwrap();
        assert_eq!(options.size, Some(300));
        assert_eq!(options.color, Some("000".to_string()));
    }

    #[test]
    fn test_api_url_validation() {
        assert!(validate_api_url("https://api.qrserver.com/v1/create-qr-code/").is_ok());
        assert!(validate_api_url("http://127.0.0.1:8080/render").is_ok());
        assert!(validate_api_url("ftp://example.com/").is_err());
        assert!(validate_api_url("not a url").is_err());
        assert!(validate_api_url("https://example.com/?size=10").is_err());
    }

    #[test]
    #[serial]
    fn test_resolved_api_url_precedence() {
        unsafe {
            std::env::remove_var(constants::env::API_URL);
        }

        let config = Config::default();
        assert_eq!(config.resolved_api_url().unwrap(), QRSERVER_API_BASE);

        let config = Config {
            api_url: Some("https://mirror.example.com/qr".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_api_url().unwrap(),
            "https://mirror.example.com/qr"
        );

        unsafe {
            std::env::set_var(constants::env::API_URL, "http://localhost:9999/qr");
        }
        assert_eq!(
            config.resolved_api_url().unwrap(),
            "http://localhost:9999/qr"
        );

        unsafe {
            std::env::set_var(constants::env::API_URL, "nope");
        }
        assert!(config.resolved_api_url().is_err());

        unsafe {
            std::env::remove_var(constants::env::API_URL);
        }
    }
}
