//! Column definitions

use serde::Deserialize;
use serde::Serialize;

use crate::error::TableError;

/// Horizontal alignment of a column's content.
///
/// Cosmetic only; the mediator passes it through to renderers untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A table column definition.
///
/// Columns are fixed for the lifetime of a table session.
///
/// # Example
///
/// ```
/// use scrollgrid_lib::model::{Alignment, Column};
///
/// let age = Column::new("age", "Age")
///     .width(50.0)
///     .sortable()
///     .align(Alignment::Right);
/// assert!(age.can_sort);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique key for this column.
    pub name: String,
    /// Header text displayed at the top.
    pub label: String,
    /// Width in pixels.
    pub width: f64,
    /// Whether header interaction may sort by this column.
    pub can_sort: bool,
    /// Content alignment.
    pub alignment: Alignment,
}

impl Column {
    /// Default column width in pixels.
    pub const DEFAULT_WIDTH: f64 = 100.0;

    /// Create a new, unsortable column with the given name and label.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            width: Self::DEFAULT_WIDTH,
            can_sort: false,
            alignment: Alignment::default(),
        }
    }

    /// Set the width in pixels.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Allow sorting by this column.
    pub fn sortable(mut self) -> Self {
        self.can_sort = true;
        self
    }

    /// Set content alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Sum of all column widths.
///
/// No horizontal windowing happens, so this is the pixel width of every row.
pub fn content_width(columns: &[Column]) -> f64 {
    columns.iter().map(|c| c.width).sum()
}

/// Check the invariants a column set must hold for a table session.
pub(crate) fn validate_columns(columns: &[Column]) -> Result<(), TableError> {
    if columns.is_empty() {
        return Err(TableError::NoColumns);
    }

    for (i, column) in columns.iter().enumerate() {
        if !column.width.is_finite() || column.width < 0.0 {
            return Err(TableError::InvalidColumnWidth {
                name: column.name.clone(),
                width: column.width,
            });
        }
        if columns[..i].iter().any(|c| c.name == column.name) {
            return Err(TableError::DuplicateColumn(column.name.clone()));
        }
    }

    Ok(())
}
