/// The main error type for Subtrack
///
/// Persistence backends deliberately do not surface errors through this type;
/// the `KeyValueStore` contract degrades failures to absence. `SubtrackError`
/// covers the fallible surfaces: store mutations addressing unknown ids,
/// the import boundary, and the HTTP collaborators (storage transport,
/// currency rate provider).
#[derive(Debug, thiserror::Error)]
pub enum SubtrackError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request timeout")]
    RequestTimeout,

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl SubtrackError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }
}

/// Result type alias for Subtrack operations
pub type Result<T> = std::result::Result<T, SubtrackError>;

// Common error type conversions

impl From<serde_json::Error> for SubtrackError {
    fn from(err: serde_json::Error) -> Self {
        // Classify based on error category
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SubtrackError::InvalidData(format!("JSON error: {}", err))
        } else {
            // IO errors are internal
            SubtrackError::Internal(format!("JSON serialization error: {}", err))
        }
    }
}

impl From<reqwest::Error> for SubtrackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubtrackError::RequestTimeout
        } else if err.is_connect() {
            SubtrackError::ServiceUnavailable(format!("Connection error: {}", err))
        } else if err.is_status() {
            if let Some(status) = err.status() {
                SubtrackError::Upstream(format!("Upstream returned {}: {}", status.as_u16(), err))
            } else {
                SubtrackError::Upstream(format!("HTTP error: {}", err))
            }
        } else {
            SubtrackError::Internal(format!("Request error: {}", err))
        }
    }
}
