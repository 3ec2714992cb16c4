//! Loaded rows and their cells

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// A single named cell of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Name of the column this cell belongs to.
    pub name: String,
    /// Display value.
    pub value: Value,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A loaded table row.
///
/// `value` is the caller's opaque payload. `cells` hold one entry per column,
/// in column order; extracting them from the payload is the loader's job.
/// Rows are never mutated once loaded.
///
/// # Example
///
/// ```
/// use scrollgrid_lib::model::{Cell, Row};
///
/// let row = Row::new("1", 42u32)
///     .with_cell(Cell::new("age", 42u32));
/// assert_eq!(row.cell("age").map(|c| c.to_string()), Some("42".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row<T> {
    /// Identifier, unique within a load cycle.
    pub id: String,
    /// Opaque payload.
    pub value: T,
    /// Cells in column order.
    pub cells: Vec<Cell>,
}

impl<T> Row<T> {
    /// Creates a row without cells.
    pub fn new(id: impl Into<String>, value: T) -> Self {
        Self {
            id: id.into(),
            value,
            cells: Vec::new(),
        }
    }

    /// Appends a cell.
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Replaces all cells.
    pub fn with_cells(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.cells = cells.into_iter().collect();
        self
    }

    /// Looks up a cell value by column name.
    pub fn cell(&self, name: &str) -> Option<&Value> {
        self.cells.iter().find(|c| c.name == name).map(|c| &c.value)
    }
}
