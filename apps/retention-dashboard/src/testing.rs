//! Shared test fixtures: a four-cluster model in two reduced dimensions and a
//! small employee table whose rows land on each cluster peak.
//!
//! Scaled features are (Age - 40) / 10 and (MonthlyIncome - 5000) / 1000; the
//! projection is the identity, so cluster means sit at (±4, 0) and (0, ±4).

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use crate::artifacts::{self, ModelArtifacts};
use crate::config::Config;
use crate::dataset::EmployeeTable;
use crate::model::encoder::CategoryEncoder;
use crate::model::{EncoderSet, FeatureScaler, GaussianMixture, ReductionTransform};
use crate::state::AppState;

pub const EMPLOYEES_CSV: &str = "\
EmployeeName,Age,Department,EmployeeCount,EmployeeNumber,MonthlyIncome,OverTime,StandardHours
Alice,80,Sales,1,1,5000,Yes,80
Bob,0,Research & Development,1,2,5000,No,80
Carol,40,Sales,1,3,9000,No,80
Dave,40,Human Resources,1,4,1000,Yes,80
Eve,40,Marketing,1,5,5000,No,80
";

fn means() -> Vec<Vec<f64>> {
    vec![
        vec![-4.0, 0.0],
        vec![0.0, 4.0],
        vec![4.0, 0.0],
        vec![0.0, -4.0],
    ]
}

fn covariances() -> Vec<Vec<Vec<f64>>> {
    vec![vec![vec![1.0, 0.0], vec![0.0, 1.0]]; 4]
}

fn weights() -> Vec<f64> {
    vec![0.25; 4]
}

pub fn scaler() -> FeatureScaler {
    FeatureScaler {
        mean: vec![40.0, 5000.0],
        scale: vec![10.0, 1000.0],
        feature_names: Some(vec!["Age".to_string(), "MonthlyIncome".to_string()]),
    }
}

pub fn reduction() -> ReductionTransform {
    ReductionTransform {
        mean: vec![0.0, 0.0],
        components: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        explained_variance: None,
        whiten: false,
    }
}

pub fn encoders() -> EncoderSet {
    let mut set = EncoderSet::new();
    set.insert(
        "Department".to_string(),
        CategoryEncoder::new(vec![
            "Human Resources".to_string(),
            "Research & Development".to_string(),
            "Sales".to_string(),
        ]),
    );
    set.insert(
        "OverTime".to_string(),
        CategoryEncoder::new(vec!["No".to_string(), "Yes".to_string()]),
    );
    set
}

pub fn artifacts() -> ModelArtifacts {
    ModelArtifacts {
        mixture: GaussianMixture::from_parts(means(), covariances(), weights())
            .expect("fixture mixture is valid"),
        reduction: reduction(),
        scaler: scaler(),
        encoders: encoders(),
    }
}

/// Writes the fixture model to a scratch directory in the persisted layout.
pub fn artifact_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    let write = |name: &str, value: serde_json::Value| {
        std::fs::write(dir.path().join(name), value.to_string()).expect("write artifact");
    };
    write(artifacts::MEANS_FILE, json!(means()));
    write(artifacts::COVARIANCES_FILE, json!(covariances()));
    write(artifacts::WEIGHTS_FILE, json!(weights()));
    write(artifacts::PCA_FILE, serde_json::to_value(reduction()).expect("serialize"));
    write(artifacts::SCALER_FILE, serde_json::to_value(scaler()).expect("serialize"));
    write(artifacts::ENCODERS_FILE, serde_json::to_value(encoders()).expect("serialize"));
    dir
}

pub fn employees() -> EmployeeTable {
    EmployeeTable::from_reader(EMPLOYEES_CSV.as_bytes(), "EmployeeName").expect("fixture csv")
}

pub fn config() -> Config {
    Config {
        models_dir: "models".into(),
        dataset_path: "employees.csv".into(),
        id_column: "EmployeeName".to_string(),
        allow_unencoded_columns: false,
        port: 0,
        rust_log: "info".to_string(),
    }
}

pub fn app_state() -> AppState {
    AppState {
        artifacts: Arc::new(artifacts()),
        employees: Arc::new(employees()),
        config: config(),
    }
}
