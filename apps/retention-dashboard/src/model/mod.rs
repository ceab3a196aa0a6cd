// Fitted model components: category encoders, standard scaler, PCA projection,
// and the Gaussian mixture used for cluster assignment.
// Everything here is immutable after load and evaluated per request.

pub mod encoder;
pub mod mixture;
pub mod reduction;
pub mod scaler;

use thiserror::Error;

pub use encoder::EncoderSet;
pub use mixture::{ClusterScores, GaussianMixture};
pub use reduction::ReductionTransform;
pub use scaler::FeatureScaler;

/// Failures raised while evaluating a fitted component against one record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("Dimension mismatch in {stage}: expected {expected}, got {actual}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Covariance of cluster component {component} is not positive-definite")]
    CovarianceSingular { component: usize },

    #[error("Record is too far from every cluster to score (non-finite log-density)")]
    NonFiniteScore,
}
