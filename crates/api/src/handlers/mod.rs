pub mod city_gems;
pub mod properties;

use axum::http::Uri;

use crate::error::AppError;

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
