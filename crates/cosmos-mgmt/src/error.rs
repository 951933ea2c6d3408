//! Error types for the Cosmos DB management client
//!
//! Every non-2xx response from the management API is surfaced as a typed
//! error carrying the status and the server's message. The client never
//! retries on its own; retry and backoff policy belong to the caller.
//!
//! # Example
//!
//! ```rust
//! use cosmos_mgmt::CosmosError;
//!
//! fn handle_error(err: CosmosError) {
//!     if err.is_not_found() {
//!         println!("Resource does not exist");
//!     } else if err.is_retryable() {
//!         println!("Temporary error, safe to retry");
//!     }
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Error type for all management API operations
#[derive(Error, Debug)]
pub enum CosmosError {
    /// Request was rejected as malformed or violating a resource invariant (400)
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Credentials were missing or invalid (401)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The principal lacks rights for this operation (403)
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// The resource does not exist (404). An expected outcome for get/delete
    /// of an absent resource, not a generic failure.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Invalid state transition, e.g. a server-side uniqueness constraint (409)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Server-side failure (5xx)
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Any other non-2xx response
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request never completed (connection, TLS, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// A response body could not be decoded into the expected type
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Input rejected client-side before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The configured base URL or a constructed path was not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for management operations
pub type Result<T> = std::result::Result<T, CosmosError>;

/// ARM error envelope: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Deserialize)]
struct ArmErrorBody {
    error: Option<ArmErrorDetail>,
    /// Some endpoints return the code/message at the top level
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArmErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

impl CosmosError {
    /// Build a typed error from a non-2xx status and raw response body.
    ///
    /// The body is parsed as the ARM error envelope when possible, falling
    /// back to the raw text so server detail is never lost.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let message = parse_arm_error(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });

        match status {
            400 => CosmosError::BadRequest { message },
            401 => CosmosError::Unauthorized { message },
            403 => CosmosError::Forbidden { message },
            404 => CosmosError::NotFound { message },
            409 => CosmosError::Conflict { message },
            500..=599 => CosmosError::ServerError { status, message },
            _ => CosmosError::ApiError { status, message },
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CosmosError::NotFound { .. })
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            CosmosError::Unauthorized { .. } | CosmosError::Forbidden { .. }
        )
    }

    /// Returns true if this is a conflict error (409)
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, CosmosError::Conflict { .. })
    }

    /// Returns true for errors where a retry can reasonably succeed
    /// (server errors and transport failures). The client itself never
    /// retries; this is a hint for callers that do.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CosmosError::ServerError { .. } => true,
            CosmosError::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

fn parse_arm_error(body: &str) -> Option<String> {
    let parsed: ArmErrorBody = serde_json::from_str(body).ok()?;
    let (code, message) = match parsed.error {
        Some(detail) => (detail.code, detail.message),
        None => (parsed.code, parsed.message),
    };
    match (code, message) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (None, Some(message)) => Some(message),
        (Some(code), None) => Some(code),
        (None, None) => None,
    }
}
