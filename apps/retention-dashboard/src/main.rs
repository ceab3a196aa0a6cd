mod artifacts;
mod config;
mod dataset;
mod errors;
mod model;
mod prediction;
mod routes;
mod state;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::artifacts::load_artifacts;
use crate::config::Config;
use crate::dataset::EmployeeTable;
use crate::prediction::{check_dataset_schema, CLUSTER_PROFILES};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting retention dashboard v{}", env!("CARGO_PKG_VERSION"));

    // Artifacts and dataset are loaded once; any failure aborts before serving.
    let artifacts = load_artifacts(&config.models_dir, CLUSTER_PROFILES.len())
        .context("Failed to load model artifacts")?;

    let employees = EmployeeTable::load(&config.dataset_path, &config.id_column)
        .context("Failed to load employee dataset")?;
    if employees.id_column().is_none() {
        info!(
            "Identifier column '{}' not present; employees are selected by row index",
            config.id_column
        );
    }

    let unencoded = check_dataset_schema(&employees, &artifacts)
        .context("Employee dataset does not match the fitted scaler")?;
    for column in &unencoded {
        warn!("Missing LabelEncoder for column: {column}");
    }
    if !unencoded.is_empty() && !config.allow_unencoded_columns {
        warn!(
            "Predictions will be rejected for these columns; set ALLOW_UNENCODED_COLUMNS=true to report them as warnings instead"
        );
    }

    let state = AppState {
        artifacts: Arc::new(artifacts),
        employees: Arc::new(employees),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
