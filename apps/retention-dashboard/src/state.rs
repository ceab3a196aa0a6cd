use std::sync::Arc;

use crate::artifacts::ModelArtifacts;
use crate::config::Config;
use crate::dataset::EmployeeTable;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ModelArtifacts>,
    pub employees: Arc<EmployeeTable>,
    pub config: Config,
}
