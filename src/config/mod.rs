//! Configuration management for usagereport

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Platform API endpoint, e.g. `https://api.sys.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,

    /// OAuth bearer token for the platform API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Report history database path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    #[serde(default)]
    pub preferences: Preferences,
}

/// Tuning knobs for inventory acquisition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Orgs fetched concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Results per page for list endpoints
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_concurrency() -> usize {
    8
}

fn default_page_size() -> usize {
    100
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".usagereport").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// An explicit path that does not exist is still an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;
        if path.is_none() && !resolved.exists() {
            log::debug!("No config at {}, using defaults", resolved.display());
            return Ok(Self::default());
        }
        Self::load_from(&resolved)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The token is a credential; keep the file private on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply command-line / environment overrides on top of the file values
    pub fn with_overrides(mut self, api: Option<&str>, token: Option<&str>) -> Self {
        if let Some(api) = api {
            self.api_endpoint = Some(api.to_string());
        }
        if let Some(token) = token {
            self.token = Some(token.to_string());
        }
        self
    }

    /// Validate that the API can be reached with this configuration
    pub fn validate_api(&self) -> Result<(&str, &str)> {
        let endpoint = self
            .api_endpoint
            .as_deref()
            .ok_or(ConfigError::MissingApiEndpoint)?;
        let token = self.token.as_deref().ok_or(ConfigError::MissingToken)?;

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API endpoint must be an http(s) URL: {}",
                endpoint
            ))
            .into());
        }

        Ok((endpoint, token))
    }
}
