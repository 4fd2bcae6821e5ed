use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base address of the recommendation backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Program used to open trailer links (e.g. `xdg-open`, `open`).
    /// When unset, trailer links are only printed.
    #[serde(default)]
    pub browser_command: Option<String>,

    /// Probe the backend's health endpoint when the shell starts
    #[serde(default = "default_health_check_on_start")]
    pub health_check_on_start: bool,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_health_check_on_start() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            browser_command: None,
            health_check_on_start: default_health_check_on_start(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the backend address is an absolute http(s) URL
    pub fn validate(&self) -> AppResult<()> {
        let url = reqwest::Url::parse(&self.backend_url)
            .map_err(|e| AppError::Config(format!("BACKEND_URL is not a valid URL: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "BACKEND_URL must use http or https, got {}",
                url.scheme()
            )));
        }

        if let Some(command) = &self.browser_command {
            if command.trim().is_empty() {
                return Err(AppError::Config(
                    "BROWSER_COMMAND cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.backend_url, "http://127.0.0.1:8000");
        assert!(config.health_check_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = from_vars(&[
            ("BACKEND_URL", "https://otaku-backend.example.com"),
            ("BROWSER_COMMAND", "xdg-open"),
            ("HEALTH_CHECK_ON_START", "false"),
        ]);
        assert_eq!(config.backend_url, "https://otaku-backend.example.com");
        assert_eq!(config.browser_command, Some("xdg-open".to_string()));
        assert!(!config.health_check_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let config = Config {
            backend_url: "localhost:8000/api".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = Config {
            backend_url: "ftp://example.com".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_browser_command() {
        let config = Config {
            browser_command: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
