//! Route admission: route metadata, the guard, and the navigation seam

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::session::roles;

pub mod guard;
pub mod navigator;

pub use guard::{Admission, DenyReason, RouteGuard};
pub use navigator::{ConsoleNavigator, Navigator};

/// Declared admission requirements for one destination.
///
/// An empty role set means any authenticated user may enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub path: String,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub roles: BTreeSet<String>,
}

impl RouteMeta {
    pub fn new<I, R>(path: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            path: path.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `path` is this route or one of its children (segment-wise)
    fn covers(&self, path: &str) -> bool {
        let own = normalize(&self.path);
        if own.is_empty() {
            return true;
        }
        match path.strip_prefix(own.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Guarded destinations, looked up by longest matching prefix
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteMeta>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteMeta>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[RouteMeta] {
        &self.routes
    }

    /// Find the most specific guarded route covering `path`.
    ///
    /// Query strings and fragments are ignored. `None` means the path is unguarded.
    pub fn resolve(&self, path: &str) -> Option<&RouteMeta> {
        let path = normalize(path);
        self.routes
            .iter()
            .filter(|route| route.covers(&path))
            .max_by_key(|route| normalize(&route.path).len())
    }
}

/// The LMS route layout: admin back-office, student learning and course
/// playback pages, the instructor dashboard, and the shared profile page.
/// Everything else (home, catalog, instructor authoring) is public.
pub fn default_routes() -> Vec<RouteMeta> {
    vec![
        RouteMeta::new("/admin", [roles::ADMIN]),
        RouteMeta::new("/my-learning", [roles::STUDENT]),
        RouteMeta::new("/profile", [roles::STUDENT, roles::INSTRUCTOR, roles::ADMIN]),
        RouteMeta::new("/instructor/dashboard", [roles::INSTRUCTOR]),
        RouteMeta::new("/courses", [roles::STUDENT]),
    ]
}

/// Where a freshly authenticated user lands, by role
pub fn landing_path(role: &str) -> &'static str {
    match role {
        roles::ADMIN => "/admin/dashboard",
        roles::INSTRUCTOR => "/instructor/dashboard",
        roles::STUDENT => "/home",
        other => {
            log::warn!("Unknown role: {}, redirecting to home", other);
            "/home"
        }
    }
}

/// Canonical form: one leading slash, no trailing slash, no query or fragment.
/// The root normalizes to the empty string.
fn normalize(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
