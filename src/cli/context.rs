//! Command execution context
//!
//! Loads configuration, opens the session database and hands out the guard,
//! simulator and intercepted transport wired to the same token store.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{AuthInterceptor, ReqwestTransport};
use crate::config::Config;
use crate::error::Result;
use crate::routing::{ConsoleNavigator, RouteGuard};
use crate::session::{SessionSimulator, TokenStore};
use crate::storage::SqliteStore;

/// Context for command execution
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Token store over the session database
    pub tokens: TokenStore,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a context from global options.
    ///
    /// # Errors
    /// Returns error if the config file is invalid or the session database cannot be opened.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;

        if let Some(url) = opts.api_base_url_ref() {
            config.api_base_url = url.to_string();
            config.validate()?;
        }
        if let Some(path) = opts.storage_ref() {
            config.storage_path = Some(PathBuf::from(path));
        }

        let store = match config.storage_path {
            Some(ref path) => SqliteStore::open_at(path)?,
            None => SqliteStore::open()?,
        };
        log::debug!("Session storage at {}", store.path().display());

        Ok(Self {
            config,
            tokens: TokenStore::new(Arc::new(store)),
            format: opts.format,
        })
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::from_config(self.tokens.clone(), &self.config)
    }

    pub fn simulator(&self) -> SessionSimulator {
        SessionSimulator::new(self.tokens.clone())
    }

    /// Interceptor over a real HTTP transport, redirects reported on the console
    pub fn transport(&self) -> Result<AuthInterceptor<ReqwestTransport>> {
        Ok(AuthInterceptor::from_config(
            ReqwestTransport::from_config(&self.config)?,
            self.tokens.clone(),
            Arc::new(ConsoleNavigator),
            &self.config,
        ))
    }
}
