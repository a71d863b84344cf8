//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::{HttpRequest, HttpResponse, Transport};
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Plain HTTP transport. Credentials are the interceptor's job, not this one's.
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        log::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        } else {
            log::debug!("{} returned {}", request.url, status);
            Err(ApiError::from_status(status, body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use reqwest::StatusCode;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_success_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/Course")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_body(r#"[{"id":1}]"#)
            .create_async()
            .await;

        let mut request = HttpRequest::get(format!("{}/api/Course", server.url()));
        request
            .headers
            .insert("authorization", "Bearer abc".parse().unwrap());

        let response = transport().send(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, r#"[{"id":1}]"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_body_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/Enrollment")
            .match_header("content-type", "application/json")
            .match_body(r#"{"courseId":3}"#)
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let request = HttpRequest::new(
            reqwest::Method::POST,
            format!("{}/api/Enrollment", server.url()),
        )
        .with_json_body(r#"{"courseId":3}"#);

        let response = transport().send(request).await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/Enrollment")
            .with_status(401)
            .create_async()
            .await;

        let err = transport()
            .send(HttpRequest::get(format!("{}/api/Enrollment", server.url())))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/Video")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let err = transport()
            .send(HttpRequest::get(format!("{}/api/Video", server.url())))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert!(err.to_string().contains("maintenance"));
    }

    #[tokio::test]
    async fn test_connection_failure_has_no_status() {
        let err = transport()
            .send(HttpRequest::get("http://127.0.0.1:1/api/Course"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Network(_))));
        assert!(err.status().is_none());
    }
}
