//! In-memory employee table loaded from the dataset CSV.
//!
//! Column types are inferred per column: numerical when every non-empty cell
//! parses as a finite float, categorical otherwise. The identifier column, when
//! present, names each row; otherwise rows are addressed by zero-based index.

pub mod record;

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::info;

pub use record::{ColumnKind, EmployeeRecord, FieldValue};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("Malformed dataset at row {row}: {source}")]
    Csv { row: usize, source: csv::Error },

    #[error("Dataset has a duplicate column '{0}'")]
    DuplicateColumn(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// The loaded dataset. Immutable after construction.
#[derive(Debug, Clone)]
pub struct EmployeeTable {
    id_column: Option<String>,
    columns: Vec<Column>,
    records: Vec<EmployeeRecord>,
}

impl EmployeeTable {
    pub fn load(path: &Path, id_column: &str) -> Result<Self, DatasetError> {
        let reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_csv(reader, id_column)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            columns = table.columns.len(),
            "Employee dataset loaded"
        );
        Ok(table)
    }

    /// Builds a table from any CSV source with a header row.
    #[cfg(test)]
    pub fn from_reader<R: Read>(source: R, id_column: &str) -> Result<Self, DatasetError> {
        Self::from_csv(csv::Reader::from_reader(source), id_column)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, id_column: &str) -> Result<Self, DatasetError> {
        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| DatasetError::Csv { row: 0, source })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if let Some(dup) = headers
            .iter()
            .enumerate()
            .find(|(i, h)| headers[..*i].contains(h))
            .map(|(_, h)| h.clone())
        {
            return Err(DatasetError::DuplicateColumn(dup));
        }

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|source| DatasetError::Csv { row: i + 1, source })?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(j, name)| Column {
                name: name.clone(),
                kind: infer_kind(rows.iter().map(|row| row[j].as_str())),
            })
            .collect();

        let id_idx = headers.iter().position(|h| h == id_column);

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                // rows with a blank name stay selectable by their index
                let id = match id_idx {
                    Some(j) if !row[j].is_empty() => row[j].clone(),
                    _ => i.to_string(),
                };
                let fields = columns
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| Some(*j) != id_idx)
                    .map(|(j, col)| (col.name.clone(), FieldValue::parse(&row[j], col.kind)))
                    .collect();
                EmployeeRecord::new(id, fields)
            })
            .collect();

        Ok(Self {
            id_column: id_idx.map(|_| id_column.to_string()),
            columns,
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The identifier column actually present in the file, if any.
    pub fn id_column(&self) -> Option<&str> {
        self.id_column.as_deref()
    }

    /// Feature columns in file order, identifier excluded.
    pub fn feature_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |c| Some(c.name.as_str()) != self.id_column.as_deref())
    }

    /// Identifiers in table order, as offered in the selection list.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id()).collect()
    }

    /// Resolves a selection to a record. Names resolve to the first matching
    /// row; without an identifier column the selection must be a row index.
    pub fn find(&self, id: &str) -> Option<&EmployeeRecord> {
        if self.id_column.is_some() {
            self.records.iter().find(|r| r.id() == id)
        } else {
            id.trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| self.records.get(idx))
        }
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let numeric = cells
        .filter(|c| !record::is_missing(c))
        .all(|c| c.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false));
    if numeric {
        ColumnKind::Numerical
    } else {
        ColumnKind::Categorical
    }
}
