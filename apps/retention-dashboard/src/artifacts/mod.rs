//! Loads the six persisted model artifacts from the models directory.
//!
//! Every failure here is fatal: the service refuses to start without a
//! complete, self-consistent artifact set.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{EncoderSet, FeatureScaler, GaussianMixture, ReductionTransform};

pub const MEANS_FILE: &str = "gmm_means.json";
pub const COVARIANCES_FILE: &str = "gmm_covariances.json";
pub const WEIGHTS_FILE: &str = "gmm_weights.json";
pub const PCA_FILE: &str = "gmm_pca.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Model artifact missing: {0}")]
    Missing(PathBuf),

    #[error("Model artifact {path} is unreadable: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Model artifact {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Model artifacts are inconsistent: {0}")]
    Invalid(String),
}

/// The fitted pipeline, shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub mixture: GaussianMixture,
    pub reduction: ReductionTransform,
    pub scaler: FeatureScaler,
    pub encoders: EncoderSet,
}

/// Loads and cross-validates all artifacts under `dir`.
///
/// `expected_clusters` is the size of the label table; a mixture with a
/// different component count is rejected here rather than at lookup time.
pub fn load_artifacts(dir: &Path, expected_clusters: usize) -> Result<ModelArtifacts, ArtifactError> {
    info!("Loading model artifacts from {}", dir.display());

    let means: Vec<Vec<f64>> = read_json(&dir.join(MEANS_FILE))?;
    let covariances: Vec<Vec<Vec<f64>>> = read_json(&dir.join(COVARIANCES_FILE))?;
    let weights: Vec<f64> = read_json(&dir.join(WEIGHTS_FILE))?;
    let reduction: ReductionTransform = read_json(&dir.join(PCA_FILE))?;
    let scaler: FeatureScaler = read_json(&dir.join(SCALER_FILE))?;
    let encoders: EncoderSet = read_json(&dir.join(ENCODERS_FILE))?;

    let mixture =
        GaussianMixture::from_parts(means, covariances, weights).map_err(ArtifactError::Invalid)?;

    let artifacts = ModelArtifacts {
        mixture,
        reduction,
        scaler,
        encoders,
    };
    artifacts.validate(expected_clusters)?;

    info!(
        clusters = artifacts.mixture.n_components(),
        reduced_dim = artifacts.mixture.dim(),
        features = artifacts.scaler.n_features(),
        encoders = artifacts.encoders.len(),
        "Model artifacts loaded"
    );

    Ok(artifacts)
}

impl ModelArtifacts {
    /// Checks that the stages chain: scaler → projection → mixture → label table.
    pub fn validate(&self, expected_clusters: usize) -> Result<(), ArtifactError> {
        if self.mixture.n_components() != expected_clusters {
            return Err(ArtifactError::Invalid(format!(
                "mixture has {} components but {expected_clusters} cluster labels are defined",
                self.mixture.n_components()
            )));
        }

        self.reduction.validate().map_err(ArtifactError::Invalid)?;

        if self.reduction.n_components() != self.mixture.dim() {
            return Err(ArtifactError::Invalid(format!(
                "projection outputs {} dimensions but mixture components have {}",
                self.reduction.n_components(),
                self.mixture.dim()
            )));
        }

        let n = self.scaler.n_features();
        if self.scaler.scale.len() != n {
            return Err(ArtifactError::Invalid(format!(
                "scaler has {n} means but {} scales",
                self.scaler.scale.len()
            )));
        }
        if let Some(names) = &self.scaler.feature_names {
            if names.len() != n {
                return Err(ArtifactError::Invalid(format!(
                    "scaler has {n} features but {} feature names",
                    names.len()
                )));
            }
        }
        if self.reduction.n_features() != n {
            return Err(ArtifactError::Invalid(format!(
                "scaler emits {n} features but projection expects {}",
                self.reduction.n_features()
            )));
        }

        for (column, encoder) in &self.encoders {
            if let Some(dup) = encoder.duplicate_class() {
                return Err(ArtifactError::Invalid(format!(
                    "encoder for '{column}' lists class '{dup}' more than once"
                )));
            }
        }

        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::Missing(path.to_path_buf())
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
