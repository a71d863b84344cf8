//! Authorization interceptor
//!
//! Wraps any [`Transport`]. Outbound, it attaches the stored credential as a
//! bearer token unless the endpoint is auth-exempt. Inbound, a 401 tears the
//! session down and redirects to login; a 403 redirects to the unauthorized page
//! and keeps the session. The original error is always returned to the caller.
//! There is no refresh or retry.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::{HttpRequest, HttpResponse, Transport};
use crate::config::Config;
use crate::error::Result;
use crate::routing::Navigator;
use crate::session::TokenStore;

/// Endpoints used before a session exists
const EXEMPT_FRAGMENTS: [&str; 3] = ["/login", "/register", "/verify-otp"];

/// Whether `url` targets an endpoint that must never carry a credential.
///
/// `/api/auth/` matches case-insensitively, the other fragments exactly.
pub fn is_auth_exempt(url: &str) -> bool {
    url.to_ascii_lowercase().contains("/api/auth/")
        || EXEMPT_FRAGMENTS.iter().any(|fragment| url.contains(fragment))
}

/// Credential-attaching, authorization-failure-reacting transport wrapper
pub struct AuthInterceptor<T: Transport> {
    inner: T,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
    unauthorized_path: String,
}

impl<T: Transport> AuthInterceptor<T> {
    pub fn new(
        inner: T,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
        login_path: &str,
        unauthorized_path: &str,
    ) -> Self {
        Self {
            inner,
            tokens,
            navigator,
            login_path: login_path.to_string(),
            unauthorized_path: unauthorized_path.to_string(),
        }
    }

    pub fn from_config(
        inner: T,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
        config: &Config,
    ) -> Self {
        Self::new(
            inner,
            tokens,
            navigator,
            &config.login_path,
            &config.unauthorized_path,
        )
    }

    /// Outbound phase. Expired credentials are attached too; the server decides.
    pub fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        if is_auth_exempt(&request.url) {
            log::debug!("Auth-exempt request, no credential attached: {}", request.url);
            return request;
        }

        let Some(token) = self.tokens.credential() else {
            return request;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
                log::debug!("Attached bearer credential to {}", request.url);
            }
            Err(e) => {
                log::warn!("Stored credential is not a valid header value: {}", e);
            }
        }
        request
    }

    /// Inbound phase. Side effects run before the result is handed back.
    pub fn observe(&self, result: Result<HttpResponse>) -> Result<HttpResponse> {
        if let Err(ref err) = result {
            match err.status() {
                Some(StatusCode::UNAUTHORIZED) => {
                    log::warn!("Token expired or invalid, redirecting to login");
                    if let Err(e) = self.tokens.clear_credential() {
                        log::error!("Failed to clear rejected credential: {}", e);
                    }
                    self.navigator.navigate_to(&self.login_path);
                }
                Some(StatusCode::FORBIDDEN) => {
                    log::warn!("Access forbidden, redirecting to unauthorized page");
                    self.navigator.navigate_to(&self.unauthorized_path);
                }
                _ => {}
            }
        }
        result
    }
}

#[async_trait]
impl<T: Transport> Transport for AuthInterceptor<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let request = self.prepare(request);
        let result = self.inner.send(request).await;
        self.observe(result)
    }
}
