//! Credential claims and compact-token decoding
//!
//! Only the payload segment is inspected. Signatures are the backend's concern;
//! the client never verifies them.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role names issued by the backend. Comparison is exact and case-sensitive.
pub mod roles {
    pub const ADMIN: &str = "Admin";
    pub const INSTRUCTOR: &str = "Instructor";
    pub const STUDENT: &str = "Student";
}

/// Decoded credential payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Stable user identifier
    #[serde(deserialize_with = "string_or_number")]
    pub sub: String,

    /// Instructor or student record ID
    #[serde(
        rename = "entityId",
        alias = "entity_id",
        alias = "EntityId",
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_id: Option<String>,

    #[serde(
        alias = "Role",
        alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    pub role: String,

    #[serde(
        default,
        alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    #[serde(
        default,
        alias = "unique_name",
        alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Issued-at, seconds since epoch
    #[serde(deserialize_with = "timestamp")]
    pub iat: i64,

    /// Expiry, seconds since epoch
    #[serde(deserialize_with = "timestamp")]
    pub exp: i64,
}

impl Claims {
    /// Expiry as an absolute instant
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Issue time as an absolute instant
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// True once `now` reaches the expiry second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Why a credential could not be decoded. Never leaves the session module.
#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("expected 3 dot-separated segments, found {0}")]
    Segments(usize),

    #[error("payload is not valid base64: {0}")]
    Base64(String),

    #[error("payload is not a valid claims object: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decode the claims segment of a compact token.
pub(crate) fn decode(token: &str) -> Result<Claims, DecodeError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(DecodeError::Segments(parts.len()));
    }

    let payload = base64_decode_url(parts[1]).map_err(DecodeError::Base64)?;
    Ok(serde_json::from_slice(&payload)?)
}

/// Decode base64url, also accepting standard alphabet and padded input.
fn base64_decode_url(input: &str) -> Result<Vec<u8>, String> {
    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input
        .trim_end_matches('=')
        .replace('-', "+")
        .replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(v) => Ok(v),
        Scalar::Float(v) if v.is_finite() => Ok(v.floor() as i64),
        Scalar::Float(_) => Err(de::Error::custom("timestamp is not finite")),
        Scalar::Text(s) => s.trim().parse::<i64>().map_err(de::Error::custom),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Int(v) => v.to_string(),
        Scalar::Float(v) => v.to_string(),
        Scalar::Text(s) => s,
    })
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(s) => s,
        }),
    )
}
