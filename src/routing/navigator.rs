//! Navigation capability consumed by the guard adapter and the interceptor

use colored::Colorize;

/// Requests a navigation to an application path.
///
/// Duplicate requests for the same path are expected (concurrent 401s) and
/// implementations must treat them as harmless.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Reports navigation requests on stderr; used by the CLI
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate_to(&self, path: &str) {
        eprintln!("{} Redirecting to {}", "→".yellow(), path.cyan());
    }
}

#[cfg(test)]
pub use recording::RecordingNavigator;
