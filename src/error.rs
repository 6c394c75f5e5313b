use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::llm::CompletionError;

/// Domain error taxonomy. The `Display` text of each variant is the
/// client-safe message; internal detail travels in the variant payload and
/// is only ever logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("AI service authentication failed. Please contact support.")]
    UpstreamAuth,
    #[error("AI service is temporarily busy. Please try again in a moment.")]
    UpstreamBusy,
    #[error("AI response timed out. Please try again.")]
    UpstreamTimeout,
    #[error("Unable to generate response. Please try again.")]
    EmptyReply,
    #[error("Referenced resource not found")]
    ReferentialIntegrity(String),
    #[error("Resource already exists")]
    Conflict(String),
    #[error("Database temporarily unavailable")]
    StorageUnavailable(String),
    #[error("An unexpected error occurred. Please try again.")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ReferentialIntegrity(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UpstreamBusy | AppError::StorageUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamAuth | AppError::EmptyReply | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ReferentialIntegrity(detail)
            | AppError::Conflict(detail)
            | AppError::StorageUnavailable(detail)
            | AppError::Internal(detail) => {
                error!(%detail, "request failed: {}", self);
            }
            _ => warn!("request failed: {}", self),
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<duckdb::Error> for AppError {
    fn from(err: duckdb::Error) -> Self {
        let detail = err.to_string();
        let lower = detail.to_lowercase();

        if lower.contains("foreign key") {
            AppError::ReferentialIntegrity(detail)
        } else if lower.contains("unique") || lower.contains("duplicate") {
            AppError::Conflict(detail)
        } else if lower.contains("io error") || lower.contains("could not open") {
            AppError::StorageUnavailable(detail)
        } else {
            AppError::Internal(detail)
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Auth => AppError::UpstreamAuth,
            CompletionError::Busy => AppError::UpstreamBusy,
            CompletionError::Timeout => AppError::UpstreamTimeout,
            CompletionError::EmptyReply => AppError::EmptyReply,
            CompletionError::Network(detail) => AppError::Internal(detail),
            CompletionError::Api { status, detail } => {
                AppError::Internal(format!("provider error {}: {}", status, detail))
            }
        }
    }
}
