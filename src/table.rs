//! Owned tables and non-owning table views.
//!
//! A table is an ordered sequence of columns sharing one row count; the
//! invariant is checked at construction and every engine operation preserves
//! it. `TableView` mirrors [`crate::column::ColumnView`]: it references
//! storage it does not own and applies row-space operations (slice, split,
//! gather maps) to all columns simultaneously, preserving row alignment.

use crate::column::{Column, ColumnView};
use crate::error::{Result, SlateError};

/// An ordered collection of equal-row-count owned columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// # Errors
    /// `LengthMismatch` if the columns disagree on row count.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for column in &columns {
                if column.len() != rows {
                    return Err(SlateError::LengthMismatch {
                        expected: rows,
                        found: column.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn view(&self) -> TableView<'_> {
        TableView {
            columns: self.columns.iter().map(Column::view).collect(),
        }
    }
}

/// A non-owning view over an ordered set of equal-length column views.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    columns: Vec<ColumnView<'a>>,
}

impl<'a> TableView<'a> {
    /// # Errors
    /// `LengthMismatch` if the column views disagree on row count.
    pub fn new(columns: Vec<ColumnView<'a>>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for column in &columns {
                if column.len() != rows {
                    return Err(SlateError::LengthMismatch {
                        expected: rows,
                        found: column.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, ColumnView::len)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> &ColumnView<'a> {
        &self.columns[index]
    }

    pub fn columns(&self) -> &[ColumnView<'a>] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn test_table_rejects_ragged_columns() {
        let a = Column::from_slice(DataType::Int32, &[1i32, 2, 3]).unwrap();
        let b = Column::from_slice(DataType::Int32, &[1i32, 2]).unwrap();
        assert!(matches!(
            Table::new(vec![a, b]),
            Err(SlateError::LengthMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_table_view_shape() {
        let a = Column::from_slice(DataType::Int32, &[1i32, 2, 3]).unwrap();
        let b = Column::utf8_from_strs(&["x", "y", "z"]).unwrap();
        let table = Table::new(vec![a, b]).unwrap();

        let view = table.view();
        assert_eq!(view.num_rows(), 3);
        assert_eq!(view.num_columns(), 2);
        assert_eq!(view.column(1).str_value(2).unwrap(), "z");
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 0);
    }
}
