//! Error types for the LMS session core

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// HTTP status carried by the error, when the failure came from the server
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(api) => api.status(),
            _ => None,
        }
    }
}

/// Transport-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required. The session is missing, expired or was rejected.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: StatusCode, message: String },

    #[error("Unexpected status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Numeric status for server-originated failures; `None` for network and parse errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Forbidden => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            ApiError::ServerError { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// Map a non-success status and its body text to the matching variant.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(if body.is_empty() {
                "Resource not found".to_string()
            } else {
                body
            }),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(if body.is_empty() {
                "Bad request".to_string()
            } else {
                body
            }),
            status if status.is_server_error() => ApiError::ServerError {
                status,
                message: body,
            },
            status => ApiError::Status {
                status,
                message: body,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Session storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine home directory for session storage")]
    NoHome,

    #[error("Session storage I/O error: {0}")]
    Io(String),

    #[error("Session database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Session storage lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_status() {
        assert_eq!(
            ApiError::Unauthorized.status(),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn test_api_error_forbidden_message() {
        let err = ApiError::Forbidden;
        assert!(err.to_string().contains("permission"));
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_network_error_has_no_status() {
        assert!(ApiError::Network("refused".to_string()).status().is_none());
        assert!(ApiError::InvalidResponse("bad".to_string()).status().is_none());
    }

    #[test]
    fn test_from_status_maps_auth_codes() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "nope".to_string()),
            ApiError::Forbidden
        ));
    }

    #[test]
    fn test_from_status_keeps_body() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "Course 42".to_string());
        assert!(err.to_string().contains("Course 42"));

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream".to_string());
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(err.to_string().contains("upstream"));
    }

    #[test]
    fn test_from_status_keeps_validation_status() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            "title is required".to_string(),
        );
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(err.to_string().contains("title is required"));

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, String::new());
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_from_status_other_code() {
        let err = ApiError::from_status(StatusCode::CONFLICT, "duplicate".to_string());
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn test_error_status_passthrough() {
        let err: Error = ApiError::Unauthorized.into();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        let err = Error::Other("local".to_string());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: [yaml: content")
            .unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }

    #[test]
    fn test_error_from_store_error() {
        let err: Error = StoreError::NoHome.into();
        match err {
            Error::Store(StoreError::NoHome) => (),
            _ => panic!("Expected Error::Store(StoreError::NoHome)"),
        }
    }
}
