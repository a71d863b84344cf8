//! Diagnostic session simulator
//!
//! Writes synthetic, unsigned credentials so the guard and interceptor can be
//! exercised locally with a chosen role. Any backend will reject these tokens.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;

use super::{TokenStore, roles};
use crate::error::Result;

/// Lifetime of a simulated credential
const SIMULATED_TTL_HOURS: i64 = 24;

const SIMULATED_SUBJECT: &str = "12345";
const SIMULATED_SIGNATURE: &str = "test-signature";

/// Roles the simulator can log in as
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SimulatedRole {
    Admin,
    Instructor,
    Student,
}

impl SimulatedRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SimulatedRole::Admin => roles::ADMIN,
            SimulatedRole::Instructor => roles::INSTRUCTOR,
            SimulatedRole::Student => roles::STUDENT,
        }
    }

    pub fn default_email(self) -> &'static str {
        match self {
            SimulatedRole::Admin => "admin@test.com",
            SimulatedRole::Instructor => "instructor@test.com",
            SimulatedRole::Student => "student@test.com",
        }
    }
}

/// Snapshot of the current session, as reported by `status`
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthStatus {
    pub fn capture(store: &TokenStore) -> Self {
        Self {
            authenticated: store.is_authenticated(),
            expired: store.is_expired(),
            role: store.role(),
            email: store.email(),
            name: store.display_name(),
            entity_id: store.entity_id(),
            issued_at: store.decode_claims().and_then(|c| c.issued_at()),
            expires_at: store.expiry_instant(),
        }
    }
}

/// Build an unsigned three-segment credential for `role`, issued at `now`.
pub fn simulate_token(role: SimulatedRole, email: &str, now: DateTime<Utc>) -> String {
    let header = json!({ "alg": "HS256", "typ": "JWT" });
    let payload = json!({
        "sub": SIMULATED_SUBJECT,
        "email": email,
        "name": format!("Test {}", role.as_str()),
        "role": role.as_str(),
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(SIMULATED_TTL_HOURS)).timestamp(),
    });

    format!(
        "{}.{}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(header.to_string()),
        general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string()),
        SIMULATED_SIGNATURE
    )
}

/// Test harness that logs in and out by writing the token store directly
pub struct SessionSimulator {
    store: TokenStore,
}

impl SessionSimulator {
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    /// Store a simulated credential for `role`, using the role's default email
    pub fn login_as(&self, role: SimulatedRole) -> Result<()> {
        self.login_as_with_email(role, role.default_email())
    }

    pub fn login_as_with_email(&self, role: SimulatedRole, email: &str) -> Result<()> {
        let token = simulate_token(role, email, Utc::now());
        self.store.set_credential(&token)?;
        log::info!("Logged in as {}", role.as_str());
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear_session()?;
        log::info!("Logged out");
        Ok(())
    }

    pub fn status(&self) -> AuthStatus {
        AuthStatus::capture(&self.store)
    }
}
