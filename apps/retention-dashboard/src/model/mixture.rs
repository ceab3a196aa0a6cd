//! Gaussian mixture evaluation for cluster assignment.
//!
//! A record's reduced coordinate `v` is assigned to the component maximising
//! `weight_i * N(v; mean_i, cov_i)`. Scores are compared in log space, so a
//! point far from every component still resolves to the nearest one instead
//! of tying at an underflowed zero. A point so far out that its Mahalanobis
//! distance overflows has no finite score and is rejected.

use nalgebra::linalg::Cholesky;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use super::ModelError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// One Gaussian component: mixing weight, mean, and full covariance.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureComponent {
    pub weight: f64,
    pub mean: Vec<f64>,
    /// Row-major d × d.
    pub covariance: Vec<Vec<f64>>,
}

/// Result of scoring one point against every component.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterScores {
    /// Index of the winning component (lowest index on ties).
    pub cluster: usize,
    /// `weight_i * N(v; mean_i, cov_i)` per component.
    pub weighted_densities: Vec<f64>,
    /// Posterior membership probabilities, summing to 1.
    pub probabilities: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMixture {
    components: Vec<MixtureComponent>,
    dim: usize,
}

impl GaussianMixture {
    /// Assembles a mixture from the three persisted parameter arrays and
    /// checks that they describe K consistent components.
    pub fn from_parts(
        means: Vec<Vec<f64>>,
        covariances: Vec<Vec<Vec<f64>>>,
        weights: Vec<f64>,
    ) -> Result<Self, String> {
        let k = means.len();
        if k == 0 {
            return Err("mixture has no components".to_string());
        }
        if covariances.len() != k || weights.len() != k {
            return Err(format!(
                "mixture parameter counts disagree: {k} means, {} covariances, {} weights",
                covariances.len(),
                weights.len()
            ));
        }

        let dim = means[0].len();
        if dim == 0 {
            return Err("mixture means are empty".to_string());
        }

        for (i, (mean, cov)) in means.iter().zip(&covariances).enumerate() {
            if mean.len() != dim {
                return Err(format!(
                    "mean of component {i} has dimension {}, expected {dim}",
                    mean.len()
                ));
            }
            if cov.len() != dim || cov.iter().any(|row| row.len() != dim) {
                return Err(format!("covariance of component {i} is not {dim}x{dim}"));
            }
            for r in 0..dim {
                for c in (r + 1)..dim {
                    let (a, b) = (cov[r][c], cov[c][r]);
                    if (a - b).abs() > SYMMETRY_TOLERANCE * a.abs().max(b.abs()).max(1.0) {
                        return Err(format!("covariance of component {i} is not symmetric"));
                    }
                }
            }
        }

        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("mixture weights must be finite and non-negative".to_string());
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("mixture weights sum to {total}, expected 1"));
        }

        let components = means
            .into_iter()
            .zip(covariances)
            .zip(weights)
            .map(|((mean, covariance), weight)| MixtureComponent {
                weight,
                mean,
                covariance,
            })
            .collect();

        Ok(Self { components, dim })
    }

    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Dimension of the space the components live in.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// `ln N(v; mean_i, cov_i)` via a Cholesky factorisation of `cov_i`.
    pub fn log_density(&self, component: usize, v: &DVector<f64>) -> Result<f64, ModelError> {
        self.check_dim(v)?;
        let comp = &self.components[component];
        let d = self.dim;

        let flat: Vec<f64> = comp.covariance.iter().flatten().copied().collect();
        let cov = DMatrix::from_row_slice(d, d, &flat);
        let chol = Cholesky::new(cov).ok_or(ModelError::CovarianceSingular { component })?;

        let diff = v - DVector::from_column_slice(&comp.mean);
        let mahalanobis = diff.dot(&chol.solve(&diff));
        let log_det: f64 = 2.0 * chol.l_dirty().diagonal().iter().map(|x| x.ln()).sum::<f64>();

        Ok(-0.5 * (d as f64 * (2.0 * std::f64::consts::PI).ln() + log_det + mahalanobis))
    }

    /// Scores `v` against every component and picks the most probable one.
    pub fn score(&self, v: &DVector<f64>) -> Result<ClusterScores, ModelError> {
        self.check_dim(v)?;

        let log_scores = self
            .components
            .iter()
            .enumerate()
            .map(|(i, comp)| Ok(comp.weight.ln() + self.log_density(i, v)?))
            .collect::<Result<Vec<f64>, ModelError>>()?;

        if log_scores.iter().any(|s| s.is_nan()) {
            return Err(ModelError::NonFiniteScore);
        }
        let cluster = argmax_first(&log_scores);
        let best = log_scores[cluster];
        // every component at -inf: there is no nearest one to normalise against
        if !best.is_finite() {
            return Err(ModelError::NonFiniteScore);
        }

        let weighted_densities = log_scores.iter().map(|s| s.exp()).collect();
        let relative: Vec<f64> = log_scores.iter().map(|s| (s - best).exp()).collect();
        let norm: f64 = relative.iter().sum();
        let probabilities = relative.iter().map(|r| r / norm).collect();

        Ok(ClusterScores {
            cluster,
            weighted_densities,
            probabilities,
        })
    }

    fn check_dim(&self, v: &DVector<f64>) -> Result<(), ModelError> {
        if v.len() != self.dim {
            return Err(ModelError::DimensionMismatch {
                stage: "mixture evaluation",
                expected: self.dim,
                actual: v.len(),
            });
        }
        Ok(())
    }
}

/// Index of the maximum value; the first maximum wins.
fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
