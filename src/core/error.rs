//! Typed error handling for the transactions API
//!
//! Every fallible operation returns one of the category errors below, and
//! handlers lift them into [`ApiError`], which knows how to render itself as
//! an HTTP response.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed query parameters (month names, numbers, undecodable query strings)
//! - [`StorageError`]: failures reported by a [`SaleStore`](crate::core::SaleStore)
//! - [`SeedError`]: failures while fetching the remote seed feed
//! - [`InitializationError`]: a failed re-seed, wrapping the step that broke
//! - [`ConfigError`]: configuration loading and validation; raised at startup, never rendered as a response
//!
//! # Response shape
//!
//! ```json
//! { "code": "STORAGE_ERROR", "message": "Server Error", "error": { "kind": "query", ... } }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// The main error type returned by handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad query input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Record store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Re-seeding the store failed
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// The underlying cause
    pub error: serde_json::Value,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Initialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Initialization(_) => "INITIALIZATION_FAILED",
        }
    }

    /// Top-level message shown to clients.
    ///
    /// Server-side failures use the generic wording the dashboard expects and
    /// carry the detail in `error`; validation failures say what was wrong.
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Initialization(_) => "Error initializing database".to_string(),
            _ => "Server Error".to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.message(),
            error: self.details(),
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(e) => e.details(),
            ApiError::Storage(e) => e.details(),
            ApiError::Initialization(e) => e.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to query parameter validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Month name not recognised
    #[error("Invalid month '{value}': expected an English month name such as 'March'")]
    InvalidMonth { value: String },

    /// A numeric parameter could not be parsed
    #[error("Invalid value '{value}' for '{field}': expected a number")]
    InvalidNumber { field: String, value: String },

    /// Missing required argument
    #[error("Missing required query parameter '{argument}'")]
    MissingArgument { argument: String },

    /// The query string itself could not be decoded
    #[error("Malformed query string: {message}")]
    MalformedQuery { message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidMonth { .. } => "INVALID_MONTH",
            ValidationError::InvalidNumber { .. } => "INVALID_NUMBER",
            ValidationError::MissingArgument { .. } => "MISSING_ARGUMENT",
            ValidationError::MalformedQuery { .. } => "MALFORMED_QUERY",
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            ValidationError::InvalidMonth { value } => {
                json!({ "kind": "invalid_month", "field": "month", "value": value })
            }
            ValidationError::InvalidNumber { field, value } => {
                json!({ "kind": "invalid_number", "field": field, "value": value })
            }
            ValidationError::MissingArgument { argument } => {
                json!({ "kind": "missing_argument", "field": argument })
            }
            ValidationError::MalformedQuery { message } => {
                json!({ "kind": "malformed_query", "message": message })
            }
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// A stored document could not be mapped to or from a sale record
    #[error("{backend} serialization error: {message}")]
    SerializationError { backend: String, message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn query(backend: &str, message: impl std::fmt::Display) -> Self {
        StorageError::QueryError {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(backend: &str, message: impl std::fmt::Display) -> Self {
        StorageError::SerializationError {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "connection",
            StorageError::QueryError { .. } => "query",
            StorageError::SerializationError { .. } => "serialization",
            StorageError::Unavailable { .. } => "unavailable",
        }
    }

    fn details(&self) -> serde_json::Value {
        json!({ "kind": self.kind(), "message": self.to_string() })
    }
}

// =============================================================================
// Seed Errors
// =============================================================================

/// Errors raised while fetching the remote seed feed
#[derive(Debug, Error)]
pub enum SeedError {
    /// The request could not be sent or the connection failed
    #[error("Failed to fetch seed data from {url}: {message}")]
    Request { url: String, message: String },

    /// The seed source answered with a non-success status
    #[error("Seed source {url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// The body was not a JSON array of sale records
    #[error("Seed payload from {url} could not be decoded: {message}")]
    Decode { url: String, message: String },
}

impl SeedError {
    fn details(&self) -> serde_json::Value {
        match self {
            SeedError::Request { url, message } => {
                json!({ "kind": "fetch", "url": url, "message": message })
            }
            SeedError::Status { url, status } => {
                json!({ "kind": "fetch_status", "url": url, "status": status })
            }
            SeedError::Decode { url, message } => {
                json!({ "kind": "decode", "url": url, "message": message })
            }
        }
    }
}

// =============================================================================
// Initialization Errors
// =============================================================================

/// A failed re-seed, tagged with the step that failed
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Database initialization failed while fetching seed data: {0}")]
    Fetch(#[source] SeedError),

    #[error("Database initialization failed while writing records: {0}")]
    Store(#[source] StorageError),
}

impl InitializationError {
    fn details(&self) -> serde_json::Value {
        match self {
            InitializationError::Fetch(e) => e.details(),
            InitializationError::Store(e) => e.details(),
        }
    }
}

impl From<SeedError> for InitializationError {
    fn from(err: SeedError) -> Self {
        InitializationError::Fetch(err)
    }
}

impl From<StorageError> for InitializationError {
    fn from(err: StorageError) -> Self {
        InitializationError::Store(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_deref()
        .map(|f| format!(" file '{f}'"))
        .unwrap_or_default()
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

/// Seed failures surface to clients as initialization failures
impl From<SeedError> for ApiError {
    fn from(err: SeedError) -> Self {
        ApiError::Initialization(InitializationError::Fetch(err))
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for handler-facing operations
pub type ApiResult<T> = Result<T, ApiError>;
