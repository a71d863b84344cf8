//! Session and authorization core for the LMS client
//!
//! - [`session::TokenStore`] owns the persisted credential and answers identity,
//!   expiry and role questions by decoding it on every call.
//! - [`routing::RouteGuard`] decides whether a navigation is admitted.
//! - [`client::AuthInterceptor`] attaches the credential to outbound requests and
//!   reacts to 401/403 responses.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod routing;
pub mod session;
pub mod storage;
