//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::clinic::ClinicError;
use crate::datastore::DataStoreError;
use crate::forms::ValidationErrors;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Form validation failed, with per-field messages
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Malformed request parameters
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Appointment status change not allowed
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Hosted data service failed
    #[error("Data service error: {0}")]
    DataService(#[from] DataStoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        match err {
            ClinicError::Validation(fields) => ApiError::Validation(fields),
            ClinicError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ClinicError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
            ClinicError::DataStore(e) => ApiError::DataService(e),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Field name to message, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            ApiError::DataService(DataStoreError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, "DATA_SERVICE_TIMEOUT")
            }
            ApiError::DataService(_) => (StatusCode::BAD_GATEWAY, "DATA_SERVICE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let (message, fields) = match self {
            ApiError::Validation(fields) => ("Validation failed".to_string(), Some(fields)),
            other => (other.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                fields,
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;

    #[test]
    fn test_clinic_error_mapping() {
        let err: ApiError = ClinicError::InvalidTransition {
            from: AppointmentStatus::Cancelled,
            to: AppointmentStatus::Confirmed,
        }
        .into();
        assert_eq!(err.status_and_code().0, StatusCode::CONFLICT);

        let err: ApiError = ClinicError::NotFound {
            entity: "patients",
            id: "p1".into(),
        }
        .into();
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);

        let err: ApiError = ClinicError::Validation(ValidationErrors::field("cpf", "CPF inválido")).into();
        assert_eq!(err.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = ClinicError::DataStore(DataStoreError::Unavailable).into();
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::BadRequest("month".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
