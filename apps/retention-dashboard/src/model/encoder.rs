use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Column name → fitted encoder, as persisted in `label_encoders.json`.
pub type EncoderSet = BTreeMap<String, CategoryEncoder>;

/// A fitted label encoder for one categorical column.
///
/// The integer code of a value is its position in `classes`. The class list is
/// fixed at fit time; values outside it are rejected rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryEncoder {
    classes: Vec<String>,
}

impl CategoryEncoder {
    #[cfg(test)]
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Returns the first class that appears more than once, if any.
    pub fn duplicate_class(&self) -> Option<&str> {
        self.classes
            .iter()
            .enumerate()
            .find(|(i, c)| self.classes[..*i].contains(c))
            .map(|(_, c)| c.as_str())
    }

    /// Encodes `value` for `column`. Fails with `UnknownCategory` when the
    /// value was never seen during fitting.
    pub fn encode(&self, column: &str, value: &str) -> Result<u32, ModelError> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|idx| idx as u32)
            .ok_or_else(|| ModelError::UnknownCategory {
                column: column.to_string(),
                value: value.to_string(),
            })
    }
}
