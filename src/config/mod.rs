//! Configuration management for ztprov

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Error, Result};
use crate::secret::SecretString;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Cloudflare API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<SecretString>,

    /// Account used when a resource configuration names neither account nor zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Custom API host, e.g. a local mock server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Values given on the command line or through the environment.
///
/// These win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_token: Option<String>,
    pub account_id: Option<String>,
    pub api_host: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ztprov").join("config.yaml"))
    }

    /// The explicit path if given, otherwise the default one.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path` or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Like [`Config::load_at`], but a missing file yields the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save configuration to `path` or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = Self::resolve_path(path)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds the API token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Layer command-line and environment values over the file.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(token) = overrides.api_token.as_deref().filter(|t| !t.is_empty()) {
            self.api_token = Some(SecretString::new(token));
        }
        if let Some(account) = overrides.account_id.as_deref().filter(|a| !a.is_empty()) {
            self.account_id = Some(account.to_string());
        }
        if let Some(host) = overrides.api_host.as_deref().filter(|h| !h.is_empty()) {
            self.api_host = Some(host.to_string());
        }
    }

    /// The API token, or an error telling the user how to configure one.
    pub fn require_token(&self) -> Result<&SecretString> {
        self.api_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingApiToken.into())
    }
}
