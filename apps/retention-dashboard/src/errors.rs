use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::model::ModelError;
use crate::prediction::PredictionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Prediction(e) => match e {
                PredictionError::Model(ModelError::UnknownCategory { .. }) => "UNKNOWN_CATEGORY",
                PredictionError::Model(ModelError::DimensionMismatch { .. }) => "DIMENSION_MISMATCH",
                PredictionError::Model(ModelError::CovarianceSingular { .. }) => {
                    "COVARIANCE_SINGULAR"
                }
                PredictionError::Model(ModelError::NonFiniteScore) => "NON_FINITE_SCORE",
                PredictionError::MissingEncoder { .. } => "MISSING_ENCODER",
                PredictionError::MissingValue { .. } => "MISSING_VALUE",
                PredictionError::MissingColumn { .. } => "MISSING_COLUMN",
                PredictionError::UnmappedCluster { .. } => "UNMAPPED_CLUSTER",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Prediction(e @ PredictionError::UnmappedCluster { .. }) => {
                tracing::error!("Cluster label table out of sync with model: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Prediction(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
