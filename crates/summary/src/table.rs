//! Ordered-row table used for every presented view.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::SummaryError;
use crate::model::{Cell, Column, MergedRow};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Project merged rows onto `columns`, preserving row order.
    pub fn project<'a>(columns: &[Column], rows: impl IntoIterator<Item = &'a MergedRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| columns.iter().map(|&c| row.cell(c)).collect())
            .collect();
        Self { columns: columns.to_vec(), rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    pub fn get(&self, row: usize, column: Column) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of one column, top to bottom. Empty if the column is absent.
    pub fn column_values(&self, column: Column) -> Vec<&Cell> {
        match self.column_index(column) {
            Some(idx) => self.rows.iter().filter_map(|r| r.get(idx)).collect(),
            None => Vec::new(),
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), SummaryError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.columns.iter().map(|c| c.header()))
            .map_err(|e| SummaryError::Io(e.to_string()))?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|cell| cell.to_string()))
                .map_err(|e| SummaryError::Io(e.to_string()))?;
        }
        wtr.flush().map_err(|e| SummaryError::Io(e.to_string()))
    }

    pub fn to_csv_string(&self) -> Result<String, SummaryError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| SummaryError::Io(e.to_string()))
    }

    pub fn save_csv(&self, path: &Path) -> Result<(), SummaryError> {
        let file = std::fs::File::create(path)
            .map_err(|e| SummaryError::Io(format!("cannot create {}: {e}", path.display())))?;
        self.write_csv(file)
    }
}
