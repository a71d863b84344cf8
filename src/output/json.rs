//! Machine-readable output: every `--format json` payload is wrapped in an envelope

use chrono::Utc;
use serde::Serialize;

/// Envelope around a command's result
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// Session status, admission decision, claims or response body
    pub data: T,

    pub meta: Metadata,
}

/// When and by which build the payload was produced
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339, UTC
    pub timestamp: String,

    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Pretty-print `data` inside the envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}
