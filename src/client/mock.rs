//! Mock transport for testing
//!
//! Returns queued outcomes in order and records every request it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex as SyncMutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Mutex;

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::{ApiError, Result};

/// Mock transport for unit tests.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new().with_error(ApiError::Unauthorized);
/// let err = mock.send(HttpRequest::get("/api/Course")).await.unwrap_err();
/// ```
#[derive(Default)]
pub struct MockTransport {
    /// Outcomes returned in order; an empty queue answers 200 `{}`
    outcomes: Arc<SyncMutex<VecDeque<Result<HttpResponse>>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; non-success statuses are queued as the matching error
    pub fn with_response(self, status: StatusCode, body: &str) -> Self {
        let outcome = if status.is_success() {
            Ok(HttpResponse::new(status, body))
        } else {
            Err(ApiError::from_status(status, body.to_string()).into())
        };
        self.push(outcome)
    }

    pub fn with_error(self, error: ApiError) -> Self {
        self.push(Err(error.into()))
    }

    fn push(self, outcome: Result<HttpResponse>) -> Self {
        self.outcomes
            .lock()
            .expect("mock outcome queue poisoned")
            .push_back(outcome);
        self
    }

    pub async fn captured_requests(&self) -> Vec<HttpRequest> {
        self.captured_requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.captured_requests.lock().await.push(request);
        let next = self
            .outcomes
            .lock()
            .expect("mock outcome queue poisoned")
            .pop_front();
        next.unwrap_or_else(|| Ok(HttpResponse::new(StatusCode::OK, "{}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outcomes_returned_in_order() {
        let mock = MockTransport::new()
            .with_response(StatusCode::OK, r#"{"id":1}"#)
            .with_error(ApiError::Forbidden)
            .with_response(StatusCode::UNAUTHORIZED, "");

        let first = mock.send(HttpRequest::get("/api/Course")).await.unwrap();
        assert_eq!(first.body, r#"{"id":1}"#);

        let second = mock.send(HttpRequest::get("/api/Course")).await.unwrap_err();
        assert_eq!(second.status(), Some(StatusCode::FORBIDDEN));

        let third = mock.send(HttpRequest::get("/api/Course")).await.unwrap_err();
        assert_eq!(third.status(), Some(StatusCode::UNAUTHORIZED));

        // Exhausted queue falls back to an empty success
        let fourth = mock.send(HttpRequest::get("/api/Course")).await.unwrap();
        assert_eq!(fourth.status, StatusCode::OK);

        assert_eq!(mock.captured_requests().await.len(), 4);
    }
}
