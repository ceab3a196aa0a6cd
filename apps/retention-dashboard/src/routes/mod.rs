pub mod dashboard;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::prediction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/employees", get(handlers::handle_list_employees))
        .route("/api/v1/predict", post(handlers::handle_predict))
        .with_state(state)
}
