//! API error type and its JSON rendering.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use aiact_classify::error::{AssessError, ClassifyError, HarvestError, ProviderError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Form input rejected before any model call (400)
    #[error("{0}")]
    BadRequest(String),

    /// Pipeline failure, mapped per stage
    #[error(transparent)]
    Assess(#[from] AssessError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        ApiError::Assess(e.into())
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Assess(e) => match e {
                AssessError::Harvest(HarvestError::EmptyDescription) => {
                    (StatusCode::BAD_REQUEST, "EMPTY_DESCRIPTION")
                }
                AssessError::Harvest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "HARVEST_FAILED"),
                AssessError::Classify(ClassifyError::UnrecognizedTier { .. }) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "UNRECOGNIZED_TIER")
                }
                AssessError::Classify(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CLASSIFY_FAILED"),
                AssessError::Provider(ProviderError::NotConfigured)
                | AssessError::Provider(ProviderError::UnknownProvider(_)) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "PROVIDER_NOT_CONFIGURED")
                }
                AssessError::Provider(ProviderError::Timeout(_)) => {
                    (StatusCode::GATEWAY_TIMEOUT, "PROVIDER_TIMEOUT")
                }
                AssessError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_FAILED"),
            },
        }
    }

    fn retryable(&self) -> bool {
        match self {
            ApiError::BadRequest(_) => false,
            ApiError::Internal(_) => true,
            ApiError::Assess(e) => e.is_retryable(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        if status.is_server_error() {
            tracing::warn!(code, error = %self, "request failed");
        }

        let mut error = json!({
            "code": code,
            "message": self.to_string(),
            "retryable": self.retryable(),
        });
        if let ApiError::Assess(e) = &self {
            if let Some(raw) = e.raw_output() {
                error["raw"] = json!(raw);
            }
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
