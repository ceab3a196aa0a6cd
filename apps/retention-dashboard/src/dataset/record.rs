use serde::Serialize;

/// Cell spellings read as missing values, following common dataframe loaders.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

pub(crate) fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numerical,
    Categorical,
}

/// One cell of an employee record. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Numerical(Option<f64>),
    Categorical(Option<String>),
}

impl FieldValue {
    /// Parses a raw cell according to its column's inferred kind.
    pub fn parse(cell: &str, kind: ColumnKind) -> Self {
        if is_missing(cell) {
            return match kind {
                ColumnKind::Numerical => FieldValue::Numerical(None),
                ColumnKind::Categorical => FieldValue::Categorical(None),
            };
        }
        match kind {
            ColumnKind::Numerical => FieldValue::Numerical(cell.parse().ok()),
            ColumnKind::Categorical => FieldValue::Categorical(Some(cell.to_string())),
        }
    }
}

/// One employee row: a display identifier plus its fields in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    id: String,
    fields: Vec<(String, FieldValue)>,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>, fields: Vec<(String, FieldValue)>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}
