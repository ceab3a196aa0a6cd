use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::ModelError;

/// Fitted PCA projection from the scaled feature space to cluster space.
///
/// `components` is row-major, one row per output dimension (d × n).
/// When `whiten` is set each output coordinate is divided by the square root
/// of its explained variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionTransform {
    pub mean: Vec<f64>,
    pub components: Vec<Vec<f64>>,
    #[serde(default)]
    pub explained_variance: Option<Vec<f64>>,
    #[serde(default)]
    pub whiten: bool,
}

impl ReductionTransform {
    /// Input dimension n.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Output dimension d.
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Checks that every component row has length n and, when whitening,
    /// that a strictly positive variance exists for each output dimension.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.n_features();
        if n == 0 || self.components.is_empty() {
            return Err("projection has no features or no components".to_string());
        }
        if let Some(row) = self.components.iter().position(|r| r.len() != n) {
            return Err(format!(
                "projection component {row} has length {}, expected {n}",
                self.components[row].len()
            ));
        }
        if self.whiten {
            match &self.explained_variance {
                Some(var) if var.len() == self.n_components() && var.iter().all(|v| *v > 0.0) => {}
                _ => {
                    return Err(
                        "whitened projection needs one positive explained variance per component"
                            .to_string(),
                    )
                }
            }
        }
        Ok(())
    }

    /// Projects one scaled feature vector: `(x - mean) · componentsᵀ`.
    pub fn transform(&self, x: &[f64]) -> Result<DVector<f64>, ModelError> {
        let n = self.n_features();
        if x.len() != n {
            return Err(ModelError::DimensionMismatch {
                stage: "dimensionality reduction",
                expected: n,
                actual: x.len(),
            });
        }

        let d = self.n_components();
        let flat: Vec<f64> = self.components.iter().flatten().copied().collect();
        let components = DMatrix::from_row_slice(d, n, &flat);
        let centered = DVector::from_column_slice(x) - DVector::from_column_slice(&self.mean);

        let mut projected = components * centered;

        if self.whiten {
            if let Some(var) = &self.explained_variance {
                for (coord, v) in projected.iter_mut().zip(var) {
                    *coord /= v.sqrt();
                }
            }
        }

        Ok(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> ReductionTransform {
        // Three features collapsed to two: first axis = f0 - f1, second = f2.
        ReductionTransform {
            mean: vec![1.0, 1.0, 0.0],
            components: vec![vec![1.0, -1.0, 0.0], vec![0.0, 0.0, 1.0]],
            explained_variance: Some(vec![4.0, 1.0]),
            whiten: false,
        }
    }

    #[test]
    fn test_projection_centres_then_multiplies() {
        let v = projection().transform(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(v.len(), 2);
        assert!((v[0] - 2.0).abs() < 1e-12);
        assert!((v[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_whitening_divides_by_component_std() {
        let mut p = projection();
        p.whiten = true;
        let v = p.transform(&[3.0, 1.0, 2.0]).unwrap();
        assert!((v[0] - 1.0).abs() < 1e-12);
        assert!((v[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_input_length_is_dimension_mismatch() {
        let err = projection().transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_ragged_components() {
        let mut p = projection();
        p.components[1].pop();
        assert!(p.validate().is_err());
        assert!(projection().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_variance_when_whitening() {
        let mut p = projection();
        p.whiten = true;
        p.explained_variance = None;
        assert!(p.validate().is_err());
    }
}
