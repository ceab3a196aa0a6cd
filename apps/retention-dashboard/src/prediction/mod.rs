// Per-request prediction pipeline: preprocess → classify → present.
// Each stage returns an explicit Result; `predict` aggregates them and
// applies the unencoded-column policy.

pub mod classifier;
pub mod handlers;
pub mod preprocess;
pub mod profiles;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::artifacts::ModelArtifacts;
use crate::dataset::EmployeeRecord;
use crate::model::{ClusterScores, ModelError};

pub use classifier::classify;
pub use preprocess::{check_dataset_schema, preprocess, EncodedField};
pub use profiles::{profile_for, CLUSTER_PROFILES};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Missing encoder for categorical column '{column}'")]
    MissingEncoder { column: String },

    #[error("Column '{column}' has no value for this employee")]
    MissingValue { column: String },

    #[error("Column '{column}' expected by the scaler is not a numerical column of the record")]
    MissingColumn { column: String },

    #[error("Cluster {cluster} has no label")]
    UnmappedCluster { cluster: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PredictOptions {
    /// Report columns without an encoder as warnings instead of failing.
    pub allow_unencoded_columns: bool,
}

/// The outcome shown to the user for one employee.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub employee: String,
    pub cluster: usize,
    pub label: &'static str,
    pub suggestion: &'static str,
    pub warnings: Vec<String>,
    pub encoded: Vec<EncodedField>,
    pub reduced: Vec<f64>,
    pub scores: ClusterScores,
}

/// Runs the full pipeline for one record.
pub fn predict(
    artifacts: &ModelArtifacts,
    record: &EmployeeRecord,
    options: PredictOptions,
) -> Result<Prediction, PredictionError> {
    let pre = preprocess(record, artifacts)?;

    let mut warnings = Vec::new();
    for field in pre.unencoded() {
        if !options.allow_unencoded_columns {
            return Err(PredictionError::MissingEncoder {
                column: field.column().to_string(),
            });
        }
        warn!(
            employee = record.id(),
            column = field.column(),
            "Categorical column has no encoder; passing through unencoded"
        );
        warnings.push(format!("Missing encoder for column: {}", field.column()));
    }

    let classification = classify(&pre.scaled, artifacts)?;
    let profile = profile_for(classification.cluster())?;

    Ok(Prediction {
        employee: record.id().to_string(),
        cluster: classification.cluster(),
        label: profile.label,
        suggestion: profile.suggestion,
        warnings,
        encoded: pre.categorical,
        reduced: classification.reduced,
        scores: classification.scores,
    })
}
