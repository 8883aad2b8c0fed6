use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] analyzer::error::AnalyzerError),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, category) = match &self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Status store error.");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_failed")
            }
            AppError::Analyzer(analyzer_err) => {
                tracing::error!(error = ?analyzer_err, "Analyzer error.");
                (StatusCode::INTERNAL_SERVER_ERROR, "analysis_failed")
            }
            AppError::InvalidBody(detail) => {
                tracing::warn!(%detail, "Rejected request body.");
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_request")
            }
        };

        let body = Json(json!({ "error": category, "detail": self.to_string() }));
        (status, body).into_response()
    }
}
