use std::any::Any;

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use citygems_cms::error::CmsError;
use serde_json::json;

/// Message for failures while fetching properties.
pub const PROPERTIES_ERROR: &str = "Error fetching properties from external API";

/// Message for failures while fetching city gems.
pub const CITY_GEMS_ERROR: &str = "Error fetching city gems from external API";

/// Detail used when a failure carries no description of its own.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{"message": ..., "error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The CMS could not be reached or answered with a failure.
    #[error("{context}: {source}")]
    Upstream {
        /// Stable message describing what was being fetched.
        context: &'static str,
        #[source]
        source: CmsError,
    },

    /// The query string could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matches the request path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An unexpected failure inside the server itself.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Adapter for `map_err` that tags a CMS failure with `context`.
    pub fn upstream(context: &'static str) -> impl FnOnce(CmsError) -> AppError {
        move |source| AppError::Upstream { context, source }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            AppError::Upstream { context, source } => {
                tracing::error!(
                    context,
                    path = source.path(),
                    upstream_status = ?source.status(),
                    kind = ?source.kind(),
                    error = %source,
                    "Upstream request failed",
                );
                let detail = source.to_string();
                let detail = if detail.is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    detail
                };
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string(), detail)
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Invalid request".to_string(), msg),
            AppError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "Resource not found".to_string(),
                path,
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    UNKNOWN_ERROR.to_string(),
                )
            }
        };

        let body = json!({
            "message": message,
            "error": error,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Response for a handler that panicked, used by the panic recovery layer.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(detail).into_response()
}
