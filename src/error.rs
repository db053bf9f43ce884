//! API error handling
//!
//! Every failure of the upload pipeline is one of the kinds below. The
//! pipeline kinds all map to 500 so existing clients see one failure status,
//! but each carries its own `error` code in the body.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use crate::models::ErrorResponse;
use crate::services::{ClassifierError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Classifier returned a non-success status, was unreachable or timed out
    #[error("Error processing image: {0}")]
    UpstreamUnavailable(String),

    /// Classifier body is not JSON or has no usable prediction
    #[error("Error processing image: {0}")]
    UpstreamMalformed(String),

    /// Local write of the upload failed
    #[error("Error processing image: {0}")]
    StorageFailure(String),

    #[error("Error processing image: {0}")]
    Internal(String),

    #[error("Invalid upload: {0}")]
    BadRequest(String),

    #[error("Upload exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UpstreamUnavailable(_) => "upstream_unavailable",
            ApiError::UpstreamMalformed(_) => "upstream_malformed",
            ApiError::StorageFailure(_) => "storage_failure",
            ApiError::Internal(_) => "internal_error",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UpstreamUnavailable(_)
            | ApiError::UpstreamMalformed(_)
            | ApiError::StorageFailure(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = self.code(), "{}", self);
        } else {
            tracing::info!(error = self.code(), "{}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            detail: self.to_string(),
        })
    }
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::RequestError(_) | ClassifierError::ApiError { .. } => {
                ApiError::UpstreamUnavailable(err.to_string())
            }
            ClassifierError::InvalidResponse(_) | ClassifierError::MissingPrediction => {
                ApiError::UpstreamMalformed(err.to_string())
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::StorageFailure(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode as UpstreamStatus;

    #[test]
    fn test_upstream_status_maps_to_500() {
        let err: ApiError = ClassifierError::ApiError {
            status: UpstreamStatus::BAD_GATEWAY,
            body: "model offline".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "upstream_unavailable");
        assert_eq!(err.to_string(), "Error processing image: ML service failed: model offline");
    }

    #[test]
    fn test_missing_prediction_is_malformed() {
        let err: ApiError = ClassifierError::MissingPrediction.into();
        assert_eq!(err.code(), "upstream_malformed");
        assert!(err.to_string().contains("Missing prediction"));
    }

    #[test]
    fn test_client_errors_keep_their_status() {
        assert_eq!(
            ApiError::BadRequest("no file".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
