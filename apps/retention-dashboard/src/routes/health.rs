use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the shape of the loaded model and dataset.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let artifacts = &state.artifacts;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "model": {
            "clusters": artifacts.mixture.n_components(),
            "reduced_dim": artifacts.mixture.dim(),
            "features": artifacts.scaler.n_features(),
            "encoders": artifacts.encoders.len(),
        },
        "employees": state.employees.len(),
    }))
}
