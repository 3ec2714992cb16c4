//! Table construction error types

/// Errors that can occur while building a table mediator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// The column set is empty.
    #[error("Table requires at least one column")]
    NoColumns,

    /// Two columns share the same name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column width is negative or not finite.
    #[error("Invalid width {width} for column {name}")]
    InvalidColumnWidth {
        /// Column name.
        name: String,
        /// Rejected width.
        width: f64,
    },

    /// A configuration value is out of range.
    #[error("Invalid config: {field}: {message}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// No tokio runtime was available to run fetches on.
    #[error("No tokio runtime available; build inside a runtime or pass a handle")]
    NoRuntime,
}

impl TableError {
    /// Creates a new config error.
    pub fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
