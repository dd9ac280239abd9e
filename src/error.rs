use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Failures of the DTR import routine that map to an HTTP response.
///
/// Batch-level failures (not found, leave conflict) abort before any row is
/// written. Storage failures surface as a generic 500 after the surrounding
/// transaction is dropped.
#[derive(Debug, Error)]
pub enum DtrError {
    #[error("No employee record matched '{name}'")]
    EmployeeNotFound { name: String },

    #[error("Employee has approved leave overlapping recorded attendance: {ranges}")]
    LeaveConflict { ranges: String },

    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}

impl ResponseError for DtrError {
    fn status_code(&self) -> StatusCode {
        match self {
            DtrError::EmployeeNotFound { .. } => StatusCode::NOT_FOUND,
            DtrError::LeaveConflict { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DtrError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            DtrError::Storage(source) => {
                tracing::error!(error = %source, "DTR import failed in the storage layer");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal Server Error"
                }))
            }
            other => HttpResponse::build(other.status_code()).json(json!({
                "message": other.to_string()
            })),
        }
    }
}
