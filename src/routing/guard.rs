//! Route admission guard
//!
//! The guard only decides. It returns an [`Admission`] and leaves the actual
//! navigation to the caller, see [`Admission::apply`].

use std::fmt;

use super::{Navigator, RouteMeta, RouteTable, landing_path};
use crate::config::Config;
use crate::session::TokenStore;

/// Why a navigation was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No credential, or an expired or undecodable one
    Unauthenticated,
    /// Authenticated, but the credential carries no role
    RoleMissing,
    /// The credential's role is not among the required roles
    RoleMismatch { role: String },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unauthenticated => write!(f, "not authenticated"),
            DenyReason::RoleMissing => write!(f, "no role in credential"),
            DenyReason::RoleMismatch { role } => write!(f, "role '{}' not permitted", role),
        }
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allow,
    Deny { reason: DenyReason, redirect: String },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Admission::Allow => None,
            Admission::Deny { redirect, .. } => Some(redirect),
        }
    }

    /// Perform the redirect for a denial. Returns whether navigation may proceed.
    pub fn apply(&self, navigator: &dyn Navigator) -> bool {
        if let Some(target) = self.redirect_target() {
            navigator.navigate_to(target);
        }
        self.is_allowed()
    }
}

/// Decides whether the current session may enter a destination
#[derive(Clone)]
pub struct RouteGuard {
    tokens: TokenStore,
    login_path: String,
    unauthorized_path: String,
}

impl RouteGuard {
    pub fn new(tokens: TokenStore, login_path: &str, unauthorized_path: &str) -> Self {
        Self {
            tokens,
            login_path: login_path.to_string(),
            unauthorized_path: unauthorized_path.to_string(),
        }
    }

    pub fn from_config(tokens: TokenStore, config: &Config) -> Self {
        Self::new(tokens, &config.login_path, &config.unauthorized_path)
    }

    /// Check the session against a destination's required roles (empty = any role).
    pub fn admit<I, R>(&self, required_roles: I) -> Admission
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        if !self.tokens.is_authenticated() {
            log::info!("User not authenticated, redirecting to login");
            return self.deny(DenyReason::Unauthenticated, &self.login_path);
        }

        let required: Vec<String> = required_roles
            .into_iter()
            .map(|r| r.as_ref().to_string())
            .collect();
        if required.is_empty() {
            return Admission::Allow;
        }

        let Some(role) = self.tokens.role() else {
            log::info!("No user role found, redirecting to login");
            return self.deny(DenyReason::RoleMissing, &self.login_path);
        };

        if !self.tokens.has_any_role(&required) {
            log::info!(
                "User role '{}' not authorized for roles: {}",
                role,
                required.join(", ")
            );
            return self.deny(DenyReason::RoleMismatch { role }, &self.unauthorized_path);
        }

        Admission::Allow
    }

    pub fn admit_route(&self, route: &RouteMeta) -> Admission {
        self.admit(&route.roles)
    }

    /// Resolve `path` in `table` and check it. Paths without an entry are not guarded.
    pub fn admit_path(&self, table: &RouteTable, path: &str) -> Admission {
        match table.resolve(path) {
            Some(route) => self.admit_route(route),
            None => {
                log::debug!("No guard declared for {}", path);
                Admission::Allow
            }
        }
    }

    /// Post-login destination for the stored credential; the login page if it cannot be decoded.
    pub fn landing_path(&self) -> String {
        match self.tokens.role() {
            Some(role) => landing_path(&role).to_string(),
            None => {
                log::error!("Failed to decode token, redirecting to login");
                self.login_path.clone()
            }
        }
    }

    fn deny(&self, reason: DenyReason, redirect: &str) -> Admission {
        Admission::Deny {
            reason,
            redirect: redirect.to_string(),
        }
    }
}
