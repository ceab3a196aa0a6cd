//! Record preprocessing: drop-list, categorical encoding, numerical scaling.

use serde::Serialize;

use crate::artifacts::ModelArtifacts;
use crate::dataset::{ColumnKind, EmployeeRecord, EmployeeTable, FieldValue};
use crate::model::ModelError;
use crate::prediction::PredictionError;

/// Columns that carry no signal and are removed before anything else.
pub const DROPPED_COLUMNS: &[&str] = &["EmployeeCount", "EmployeeNumber", "StandardHours"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnencodedReason {
    MissingEncoder,
}

/// Outcome of encoding one categorical field. `Unencoded` keeps the raw
/// value and leaves the accept/reject decision to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EncodedField {
    Encoded {
        column: String,
        raw: String,
        code: u32,
    },
    Unencoded {
        column: String,
        raw: String,
        reason: UnencodedReason,
    },
}

impl EncodedField {
    pub fn column(&self) -> &str {
        match self {
            EncodedField::Encoded { column, .. } | EncodedField::Unencoded { column, .. } => column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreprocessedRecord {
    /// Categorical fields, encoded where an encoder exists. Reference only.
    pub categorical: Vec<EncodedField>,
    /// Numerical columns in the order they were fed to the scaler.
    pub feature_columns: Vec<String>,
    pub scaled: Vec<f64>,
}

impl PreprocessedRecord {
    pub fn unencoded(&self) -> impl Iterator<Item = &EncodedField> {
        self.categorical
            .iter()
            .filter(|f| matches!(f, EncodedField::Unencoded { .. }))
    }
}

fn is_dropped(column: &str) -> bool {
    DROPPED_COLUMNS.contains(&column)
}

pub fn preprocess(
    record: &EmployeeRecord,
    artifacts: &ModelArtifacts,
) -> Result<PreprocessedRecord, PredictionError> {
    let kept: Vec<&(String, FieldValue)> = record
        .fields()
        .iter()
        .filter(|(name, _)| !is_dropped(name))
        .collect();

    let mut categorical = Vec::new();
    let mut numerical: Vec<(&str, Option<f64>)> = Vec::new();

    for (name, value) in kept {
        match value {
            FieldValue::Numerical(v) => numerical.push((name.as_str(), *v)),
            FieldValue::Categorical(raw) => {
                let raw = raw.as_deref().ok_or_else(|| PredictionError::MissingValue {
                    column: name.clone(),
                })?;
                let field = match artifacts.encoders.get(name) {
                    Some(encoder) => EncodedField::Encoded {
                        column: name.clone(),
                        raw: raw.to_string(),
                        code: encoder.encode(name, raw)?,
                    },
                    None => EncodedField::Unencoded {
                        column: name.clone(),
                        raw: raw.to_string(),
                        reason: UnencodedReason::MissingEncoder,
                    },
                };
                categorical.push(field);
            }
        }
    }

    let ordered: Vec<(&str, Option<f64>)> = match &artifacts.scaler.feature_names {
        Some(names) => names
            .iter()
            .map(|wanted| {
                numerical
                    .iter()
                    .find(|(name, _)| name == wanted)
                    .copied()
                    .ok_or_else(|| PredictionError::MissingColumn {
                        column: wanted.clone(),
                    })
            })
            .collect::<Result<_, _>>()?,
        None => numerical,
    };

    let raw = ordered
        .iter()
        .map(|(name, v)| {
            v.ok_or_else(|| PredictionError::MissingValue {
                column: name.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let scaled = artifacts.scaler.transform(&raw)?;

    Ok(PreprocessedRecord {
        categorical,
        feature_columns: ordered.iter().map(|(name, _)| name.to_string()).collect(),
        scaled,
    })
}

/// Checks the dataset's column layout against the fitted scaler once at
/// startup. Returns the categorical columns that have no encoder.
pub fn check_dataset_schema(
    table: &EmployeeTable,
    artifacts: &ModelArtifacts,
) -> Result<Vec<String>, PredictionError> {
    let numerical: Vec<&str> = table
        .feature_columns()
        .filter(|c| c.kind == ColumnKind::Numerical && !is_dropped(&c.name))
        .map(|c| c.name.as_str())
        .collect();

    if let Some(names) = &artifacts.scaler.feature_names {
        if let Some(missing) = names.iter().find(|n| !numerical.contains(&n.as_str())) {
            return Err(PredictionError::MissingColumn {
                column: missing.clone(),
            });
        }
    }

    if numerical.len() != artifacts.scaler.n_features() {
        return Err(ModelError::DimensionMismatch {
            stage: "dataset schema",
            expected: artifacts.scaler.n_features(),
            actual: numerical.len(),
        }
        .into());
    }

    Ok(table
        .feature_columns()
        .filter(|c| c.kind == ColumnKind::Categorical && !is_dropped(&c.name))
        .filter(|c| !artifacts.encoders.contains_key(&c.name))
        .map(|c| c.name.clone())
        .collect())
}
