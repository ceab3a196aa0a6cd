use serde::Serialize;

use crate::artifacts::ModelArtifacts;
use crate::model::{ClusterScores, ModelError};

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// The record's coordinate in the reduced space.
    pub reduced: Vec<f64>,
    pub scores: ClusterScores,
}

impl Classification {
    pub fn cluster(&self) -> usize {
        self.scores.cluster
    }
}

/// Projects a scaled feature vector and assigns it to the most probable
/// mixture component.
pub fn classify(scaled: &[f64], artifacts: &ModelArtifacts) -> Result<Classification, ModelError> {
    let reduced = artifacts.reduction.transform(scaled)?;
    let scores = artifacts.mixture.score(&reduced)?;
    Ok(Classification {
        reduced: reduced.iter().copied().collect(),
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReductionTransform;
    use crate::testing;

    #[test]
    fn test_each_cluster_peak_is_recovered() {
        let artifacts = testing::artifacts();
        let cases = [
            ([-4.0, 0.0], 0),
            ([0.0, 4.0], 1),
            ([4.0, 0.0], 2),
            ([0.0, -4.0], 3),
        ];
        for (point, expected) in cases {
            let result = classify(&point, &artifacts).unwrap();
            assert_eq!(result.cluster(), expected, "point {point:?}");
            assert_eq!(result.reduced, point.to_vec());
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let artifacts = testing::artifacts();
        let a = classify(&[1.3, -0.7], &artifacts).unwrap();
        let b = classify(&[1.3, -0.7], &artifacts).unwrap();
        assert_eq!(a.cluster(), b.cluster());
        assert_eq!(a.scores.weighted_densities, b.scores.weighted_densities);
    }

    #[test]
    fn test_projection_width_mismatch_surfaces() {
        let mut artifacts = testing::artifacts();
        // Projection now outputs three coordinates; the mixture lives in two.
        artifacts.reduction = ReductionTransform {
            mean: vec![0.0, 0.0],
            components: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
            explained_variance: None,
            whiten: false,
        };
        let err = classify(&[0.0, 0.0], &artifacts).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                stage: "mixture evaluation",
                expected: 2,
                actual: 3,
            }
        );
    }
}
