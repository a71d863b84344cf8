//! Shell completions for the lms-session CLI
//!
//! Static scripts come from `lms-session completion <SHELL>`. Dynamic
//! completion (`COMPLETE=<shell> lms-session`) also offers the configured
//! route paths for `check`.

use std::io;

use clap::CommandFactory;
use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use crate::cli::{Cli, Shell};
use crate::config::Config;

/// Complete route paths from the configuration, with required roles as help.
///
/// Completions should never break the shell, so a bad config yields nothing.
pub fn complete_route_paths() -> Vec<CompletionCandidate> {
    let config_path = std::env::var("LMS_CONFIG").ok();
    let Ok(config) = Config::load_at(config_path.as_deref()) else {
        return vec![];
    };

    config
        .routes
        .into_iter()
        .map(|route| {
            let help = if route.roles.is_empty() {
                "any authenticated user".to_string()
            } else {
                route.roles.into_iter().collect::<Vec<_>>().join(" | ")
            };
            CompletionCandidate::new(route.path).help(Some(help.into()))
        })
        .collect()
}

/// Create completion candidates for route paths.
pub fn route_path_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_route_paths)
}

/// Write the static completion script for `shell` to stdout
pub fn print_static(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "lms-session", &mut io::stdout());
}
