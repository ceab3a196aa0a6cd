//! Axum route handlers for the prediction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::prediction::{predict, PredictOptions, Prediction};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EmployeesResponse {
    /// Column the identifiers come from; `None` means row indices.
    pub id_column: Option<String>,
    pub employees: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub employee: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/employees
///
/// Identifiers for the selection list, in dataset order.
pub async fn handle_list_employees(State(state): State<AppState>) -> Json<EmployeesResponse> {
    Json(EmployeesResponse {
        id_column: state.employees.id_column().map(str::to_string),
        employees: state.employees.ids().into_iter().map(str::to_string).collect(),
    })
}

/// POST /api/v1/predict
///
/// Classifies the selected employee and returns the cluster label and
/// retention suggestion. Any pipeline failure is returned as a single error.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Prediction>, AppError> {
    if request.employee.trim().is_empty() {
        return Err(AppError::Validation("employee cannot be empty".to_string()));
    }

    let record = state
        .employees
        .find(&request.employee)
        .ok_or_else(|| AppError::NotFound(format!("Employee '{}' not found", request.employee)))?;

    let options = PredictOptions {
        allow_unencoded_columns: state.config.allow_unencoded_columns,
    };
    let prediction = predict(&state.artifacts, record, options)?;

    info!(
        employee = %prediction.employee,
        cluster = prediction.cluster,
        label = prediction.label,
        "Prediction served"
    );

    Ok(Json(prediction))
}
