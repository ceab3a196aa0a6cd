use serde::{Deserialize, Serialize};

use super::ModelError;

/// Fitted per-column standardisation: `z = (x - mean) / scale`.
///
/// `feature_names` is optional. When present it pins the column order the
/// scaler was fitted with, and the preprocessor assembles vectors by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl FeatureScaler {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        if x.len() != self.n_features() {
            return Err(ModelError::DimensionMismatch {
                stage: "feature scaling",
                expected: self.n_features(),
                actual: x.len(),
            });
        }

        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&v, (&m, &s))| {
                // Constant columns were fitted with scale 0; they pass through centred.
                let s = if s == 0.0 { 1.0 } else { s };
                (v - m) / s
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> FeatureScaler {
        FeatureScaler {
            mean: vec![40.0, 5000.0],
            scale: vec![10.0, 1000.0],
            feature_names: None,
        }
    }

    #[test]
    fn test_transform_standardises_each_column() {
        let z = scaler().transform(&[60.0, 3000.0]).unwrap();
        assert!((z[0] - 2.0).abs() < 1e-12);
        assert!((z[1] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_treated_as_unit() {
        let s = FeatureScaler {
            mean: vec![1.0],
            scale: vec![0.0],
            feature_names: None,
        };
        assert_eq!(s.transform(&[3.5]).unwrap(), vec![2.5]);
    }

    #[test]
    fn test_wrong_length_is_dimension_mismatch() {
        let err = scaler().transform(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                stage: "feature scaling",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_transform_is_repeatable() {
        let s = scaler();
        let x = [33.0, 4200.0];
        assert_eq!(s.transform(&x).unwrap(), s.transform(&x).unwrap());
    }

    #[test]
    fn test_feature_names_optional_in_json() {
        let s: FeatureScaler = serde_json::from_str(r#"{"mean": [0.0], "scale": [1.0]}"#).unwrap();
        assert!(s.feature_names.is_none());
    }
}
