//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;
use reqwest::Method;

use crate::session::SimulatedRole;
use completions::route_path_candidates;

pub mod args;
pub mod completions;
pub mod context;
pub mod request;
pub mod routes;
pub mod session;
pub mod token;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// lms-session - session and authorization companion for the LMS client
#[derive(Parser, Debug)]
#[command(name = "lms-session")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "LMS_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "LMS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override session database location
    #[arg(long, global = true, env = "LMS_STORAGE", hide_env = true)]
    pub storage: Option<String>,

    /// Override the backend base URL
    #[arg(long, global = true, env = "LMS_API_BASE_URL", hide_env = true)]
    pub api_base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "LMS_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in as a simulated user (diagnostic only, the token is unsigned)
    Login {
        /// Role to simulate
        #[arg(long, value_enum)]
        role: SimulatedRole,

        /// Email claim (defaults to <role>@test.com)
        #[arg(long)]
        email: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Manage the stored credential
    #[command(subcommand)]
    Token(TokenCommands),

    /// Show authentication status
    Status,

    /// List guarded routes and their required roles
    Routes,

    /// Check whether the current session may navigate to a path
    Check {
        /// Application path, e.g. /admin/dashboard
        #[arg(add = route_path_candidates())]
        path: String,
    },

    /// Send an HTTP request through the authorization interceptor
    Request {
        /// HTTP method (GET, POST, PUT, DELETE, ...)
        #[arg(value_parser = parse_method)]
        method: Method,

        /// Absolute URL or path relative to the API base URL
        url: String,

        /// JSON request body
        #[arg(long, short)]
        data: Option<String>,
    },

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions:
  bash:   lms-session completion bash > /etc/bash_completion.d/lms-session
  zsh:    lms-session completion zsh > \"${fpath[1]}/_lms-session\"
  fish:   lms-session completion fish > ~/.config/fish/completions/lms-session.fish

Dynamic completions (includes configured route paths):
  bash:   echo 'source <(COMPLETE=bash lms-session)' >> ~/.bashrc
  zsh:    echo 'source <(COMPLETE=zsh lms-session)' >> ~/.zshrc")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// Credential subcommands
#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Store a backend-issued credential (prompted when omitted)
    Set {
        /// The compact token string
        token: Option<String>,
    },

    /// Print the raw stored credential
    Show,

    /// Print the decoded claims of the stored credential
    Claims,
}

fn parse_method(value: &str) -> std::result::Result<Method, String> {
    Method::from_bytes(value.to_ascii_uppercase().as_bytes()).map_err(|e| e.to_string())
}
