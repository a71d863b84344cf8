//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; the config file is applied in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.lms-session/config.yaml)
    pub config: Option<String>,

    /// Custom session database path
    pub storage: Option<String>,

    /// Backend base URL override
    pub api_base_url: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            storage: cli.storage.clone(),
            api_base_url: cli.api_base_url.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn storage_ref(&self) -> Option<&str> {
        self.storage.as_deref()
    }

    pub fn api_base_url_ref(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_copies_globals() {
        let cli = Cli::parse_from([
            "lms-session",
            "--format",
            "json",
            "--config",
            "/custom/config.yaml",
            "--storage",
            "/tmp/session.db",
            "--api-base-url",
            "http://localhost:8080",
            "status",
        ]);
        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(opts.config_ref(), Some("/custom/config.yaml"));
        assert_eq!(opts.storage_ref(), Some("/tmp/session.db"));
        assert_eq!(opts.api_base_url_ref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_default_accessors() {
        let opts = GlobalOptions::default();
        assert_eq!(opts.format, OutputFormat::Pretty);
        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.storage_ref(), None);
        assert_eq!(opts.api_base_url_ref(), None);
    }
}
