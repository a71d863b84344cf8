//! Configuration management for lms-session

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::routing::{RouteMeta, RouteTable, default_routes};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the LMS REST backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Session database location (defaults to ~/.lms-session/session.db)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Where unauthenticated users are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Where authenticated users lacking a role are sent
    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Route admission metadata
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteMeta>,
}

fn default_api_base_url() -> String {
    "http://localhost:5075".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_unauthorized_path() -> String {
    "/unauthorized".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_path: None,
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
            timeout_secs: default_timeout_secs(),
            routes: default_routes(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".lms-session").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from an optional path, falling back to defaults when no file exists
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match Self::load_from(Self::resolve_path(path)?) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                log::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Reject values the guard and interceptor cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            ))
            .into());
        }
        for (name, value) in [
            ("login_path", &self.login_path),
            ("unauthorized_path", &self.unauthorized_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with '/', got '{}'",
                    name, value
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Build an absolute URL; absolute inputs are returned unchanged
    pub fn url_for(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            return target.to_string();
        }
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    }

    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(self.routes.clone())
    }
}
