use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default, so an empty environment runs against
/// `./models` and `./Employee-Attrition-uml.csv`.
#[derive(Debug, Clone)]
pub struct Config {
    pub models_dir: PathBuf,
    pub dataset_path: PathBuf,
    /// Column holding the display name used in the selection list.
    pub id_column: String,
    /// When false, a categorical column without a fitted encoder fails the
    /// request instead of being reported as a warning.
    pub allow_unencoded_columns: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            models_dir: env_or("MODELS_DIR", "models").into(),
            dataset_path: env_or("DATASET_PATH", "Employee-Attrition-uml.csv").into(),
            id_column: env_or("ID_COLUMN", "EmployeeName"),
            allow_unencoded_columns: env_or("ALLOW_UNENCODED_COLUMNS", "false")
                .parse::<bool>()
                .context("ALLOW_UNENCODED_COLUMNS must be 'true' or 'false'")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
