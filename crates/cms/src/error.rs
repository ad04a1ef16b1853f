//! Failure taxonomy of the content fetch layer.

use reqwest::StatusCode;

/// Errors from fetching CMS content.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// No response was received: connection, DNS, TLS, timeout, or the body
    /// could not be read.
    #[error("A network error occurred while fetching data from {path}: {source}")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The CMS answered with a non-2xx status.
    #[error("External API request failed with status: {status} {}", status_reason(.status))]
    HttpStatus {
        path: String,
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The CMS answered 2xx with a payload that does not have the expected shape.
    #[error("Malformed response from {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse classification used for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    NotFound,
    Unauthorized,
    Forbidden,
    Validation,
    Server,
    Unknown,
}

impl ErrorKind {
    /// Stable message suitable for showing on the kiosk.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::Network => "Network connection error. Please check your internet connection.",
            ErrorKind::Timeout => "Request timed out. Please try again.",
            ErrorKind::NotFound => "The requested resource was not found.",
            ErrorKind::Unauthorized => "You are not authorized to access this resource.",
            ErrorKind::Forbidden => "Access to this resource is forbidden.",
            ErrorKind::Validation => "Invalid request data.",
            ErrorKind::Server => "Server error. Please try again later.",
            ErrorKind::Unknown => "An unexpected error occurred. Please try again.",
        }
    }
}

impl CmsError {
    /// Resource path of the failed request.
    pub fn path(&self) -> &str {
        match self {
            CmsError::Network { path, .. }
            | CmsError::HttpStatus { path, .. }
            | CmsError::Malformed { path, .. } => path,
        }
    }

    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            CmsError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CmsError::Network { source, .. } if source.is_timeout() => ErrorKind::Timeout,
            CmsError::Network { .. } => ErrorKind::Network,
            CmsError::HttpStatus { status, .. } => match *status {
                400 => ErrorKind::Validation,
                401 => ErrorKind::Unauthorized,
                403 => ErrorKind::Forbidden,
                404 => ErrorKind::NotFound,
                408 => ErrorKind::Timeout,
                s if s >= 500 => ErrorKind::Server,
                _ => ErrorKind::Unknown,
            },
            CmsError::Malformed { .. } => ErrorKind::Unknown,
        }
    }

    /// Transient failures worth retrying: no response, 408, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            CmsError::Network { .. } => true,
            CmsError::HttpStatus { status, .. } => is_retryable_status(*status),
            CmsError::Malformed { .. } => false,
        }
    }
}

/// Statuses that indicate a transient upstream condition.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429) || (500..600).contains(&status)
}

fn status_reason(status: &u16) -> &'static str {
    StatusCode::from_u16(*status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}
