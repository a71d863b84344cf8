//! Client-side session: credential storage, claims and identity queries
//!
//! [`TokenStore`] is the only component that reads or writes the credential slot.
//! Every query decodes the stored credential afresh, so a `set_credential` from one
//! call site is visible to the next query from any other call site without any
//! cache invalidation.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore};

pub mod claims;
pub mod simulator;

pub use claims::{Claims, roles};
pub use simulator::{AuthStatus, SessionSimulator, SimulatedRole};

/// Storage key holding the raw credential
pub const TOKEN_KEY: &str = "token";

/// Legacy key left behind by older login flows; removed on logout
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Owner of the persisted credential and the query surface over its claims
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Token store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The stored credential, if any. Storage read failures count as absent.
    pub fn credential(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("Failed to read stored credential: {}", e);
                None
            }
        }
    }

    /// Persist a credential, replacing any prior one. The token is not validated.
    pub fn set_credential(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        Ok(())
    }

    /// Remove the credential. No-op when nothing is stored.
    pub fn clear_credential(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        Ok(())
    }

    /// Logout cleanup: the credential plus any legacy refresh token entry.
    pub fn clear_session(&self) -> Result<()> {
        self.clear_credential()?;
        self.storage.remove(REFRESH_TOKEN_KEY)?;
        Ok(())
    }

    /// Decode the stored credential. Malformed credentials are logged and yield `None`.
    pub fn decode_claims(&self) -> Option<Claims> {
        let token = self.credential()?;
        match claims::decode(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                log::warn!("Error decoding token: {}", e);
                None
            }
        }
    }

    /// True when there is no credential, it cannot be decoded, or it has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.decode_claims() {
            Some(claims) => claims.is_expired_at(now),
            None => true,
        }
    }

    /// A credential is stored and has not expired
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.credential().is_some() && !self.is_expired_at(now)
    }

    pub fn role(&self) -> Option<String> {
        self.decode_claims().map(|c| c.role).filter(|r| !r.is_empty())
    }

    pub fn subject(&self) -> Option<String> {
        self.decode_claims().map(|c| c.sub).filter(|s| !s.is_empty())
    }

    /// Instructor or student record ID used by enrollment and authoring calls
    pub fn entity_id(&self) -> Option<String> {
        self.decode_claims()
            .and_then(|c| c.entity_id)
            .filter(|id| !id.is_empty())
    }

    pub fn email(&self) -> Option<String> {
        self.decode_claims()
            .and_then(|c| c.email)
            .filter(|e| !e.is_empty())
    }

    pub fn display_name(&self) -> Option<String> {
        self.decode_claims()
            .and_then(|c| c.name)
            .filter(|n| !n.is_empty())
    }

    /// Exact, case-sensitive role comparison
    pub fn has_role(&self, role: &str) -> bool {
        self.role().is_some_and(|r| r == role)
    }

    /// True when a role is present and is one of `roles`
    pub fn has_any_role<I, R>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        match self.role() {
            Some(current) => roles.into_iter().any(|r| r.as_ref() == current),
            None => false,
        }
    }

    pub fn expiry_instant(&self) -> Option<DateTime<Utc>> {
        self.decode_claims().and_then(|c| c.expires_at())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};
    use chrono::Duration;
    use serde_json::json;

    /// Build an unsigned token carrying `role` that expires `ttl` from now
    pub(crate) fn token_for(role: &str, ttl: Duration) -> String {
        let now = Utc::now();
        let payload = json!({
            "sub": "user-1",
            "entityId": "st-7",
            "role": role,
            "email": "user@example.com",
            "name": "Test User",
            "iat": now.timestamp(),
            "exp": (now + ttl).timestamp(),
        });
        format!(
            "{}.{}.sig",
            general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    pub(crate) fn store_with(role: &str, ttl: Duration) -> TokenStore {
        let store = TokenStore::in_memory();
        store.set_credential(&token_for(role, ttl)).unwrap();
        store
    }

    #[test]
    fn test_empty_store() {
        let store = TokenStore::in_memory();
        assert!(store.credential().is_none());
        assert!(store.decode_claims().is_none());
        assert!(store.is_expired());
        assert!(!store.is_authenticated());
        assert!(store.role().is_none());
        assert!(store.expiry_instant().is_none());
        assert!(!store.has_any_role([roles::ADMIN]));
    }

    #[test]
    fn test_set_and_clear_credential() {
        let store = TokenStore::in_memory();
        store.set_credential("a.b.c").unwrap();
        assert_eq!(store.credential().as_deref(), Some("a.b.c"));

        store.clear_credential().unwrap();
        assert!(store.credential().is_none());
        store.clear_credential().unwrap();
    }

    #[test]
    fn test_empty_credential_counts_as_absent() {
        let store = TokenStore::in_memory();
        store.set_credential("").unwrap();
        assert!(store.credential().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_valid_credential_projections() {
        let store = store_with(roles::INSTRUCTOR, Duration::hours(1));

        assert!(store.is_authenticated());
        assert!(!store.is_expired());
        assert_eq!(store.role().as_deref(), Some("Instructor"));
        assert_eq!(store.subject().as_deref(), Some("user-1"));
        assert_eq!(store.entity_id().as_deref(), Some("st-7"));
        assert_eq!(store.email().as_deref(), Some("user@example.com"));
        assert_eq!(store.display_name().as_deref(), Some("Test User"));
        assert!(store.expiry_instant().unwrap() > Utc::now());
    }

    #[test]
    fn test_expired_credential_is_not_authenticated() {
        let store = store_with(roles::INSTRUCTOR, Duration::hours(-1));
        assert!(store.credential().is_some());
        assert!(store.is_expired());
        assert!(!store.is_authenticated());
        // Claims are still readable from an expired credential
        assert_eq!(store.role().as_deref(), Some("Instructor"));
    }

    #[test]
    fn test_expiry_is_monotonic_around_exp() {
        let store = store_with(roles::STUDENT, Duration::hours(1));
        let exp = store.expiry_instant().unwrap();

        assert!(!store.is_expired_at(exp - Duration::seconds(1)));
        assert!(!store.is_expired_at(exp - Duration::days(30)));
        assert!(store.is_expired_at(exp));
        assert!(store.is_expired_at(exp + Duration::seconds(1)));
        assert!(!store.is_authenticated_at(exp));
    }

    #[test]
    fn test_malformed_credential_fails_soft() {
        for garbage in ["not-a-token", "a.b", "x.%%%.y", "a.e30.c", "🙃.🙃.🙃"] {
            let store = TokenStore::in_memory();
            store.set_credential(garbage).unwrap();
            assert!(store.decode_claims().is_none(), "{garbage}");
            assert!(store.is_expired(), "{garbage}");
            assert!(!store.is_authenticated(), "{garbage}");
            assert!(store.role().is_none(), "{garbage}");
        }
    }

    #[test]
    fn test_role_checks_are_case_sensitive() {
        let store = store_with(roles::ADMIN, Duration::hours(1));
        assert!(store.has_role("Admin"));
        assert!(!store.has_role("admin"));
        assert!(store.has_any_role(["Student", "Admin"]));
        assert!(!store.has_any_role(["ADMIN"]));
        assert!(!store.has_any_role(Vec::<String>::new()));
    }

    #[test]
    fn test_queries_reflect_external_change() {
        let store = store_with(roles::STUDENT, Duration::hours(1));
        let other_handle = store.clone();

        other_handle
            .set_credential(&token_for(roles::ADMIN, Duration::hours(1)))
            .unwrap();
        assert_eq!(store.role().as_deref(), Some("Admin"));

        other_handle.clear_credential().unwrap();
        assert!(store.role().is_none());
    }

    #[test]
    fn test_clear_session_removes_refresh_token() {
        let backend = Arc::new(MemoryStore::new());
        let store = TokenStore::new(backend.clone());
        store.set_credential("a.b.c").unwrap();
        backend.set(REFRESH_TOKEN_KEY, "r-123").unwrap();

        store.clear_session().unwrap();

        assert!(store.credential().is_none());
        assert_eq!(backend.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }
}
