//! Table configuration

use std::time::Duration;

use crate::error::TableError;

/// Pixel geometry and fetch settings for a table session.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use scrollgrid_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_row_height(32.0)
///     .with_fetch_timeout(Duration::from_secs(10));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    /// Height of the sticky header, in pixels.
    ///
    /// Default: 25
    pub header_height: f64,

    /// Uniform height of every data row, in pixels.
    ///
    /// Default: 40
    pub row_height: f64,

    /// Height reserved below the rows for the loading placeholder while more
    /// data may arrive.
    ///
    /// Default: 40
    pub status_height: f64,

    /// Maximum time a single fetch may stay pending.
    ///
    /// Default: none (a fetch that never resolves keeps the table pending)
    pub fetch_timeout: Option<Duration>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_height: 25.0,
            row_height: 40.0,
            status_height: 40.0,
            fetch_timeout: None,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header height.
    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    /// Sets the row height.
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Sets the status/loading row height.
    pub fn with_status_height(mut self, height: f64) -> Self {
        self.status_height = height;
        self
    }

    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Checks that every height is usable for layout math.
    pub fn validate(&self) -> Result<(), TableError> {
        let non_negative = [
            ("header_height", self.header_height),
            ("status_height", self.status_height),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TableError::config(field, format!("must be >= 0, got {}", value)));
            }
        }

        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(TableError::config(
                "row_height",
                format!("must be > 0, got {}", self.row_height),
            ));
        }

        if self.fetch_timeout == Some(Duration::ZERO) {
            return Err(TableError::config("fetch_timeout", "must be non-zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scroller_geometry() {
        let config = TableConfig::default();
        assert_eq!(config.header_height, 25.0);
        assert_eq!(config.row_height, 40.0);
        assert_eq!(config.status_height, 40.0);
        assert!(config.fetch_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_row_height_rejected() {
        let err = TableConfig::new().with_row_height(0.0).validate().unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "row_height", .. }));
    }

    #[test]
    fn test_nan_header_rejected() {
        let err = TableConfig::new()
            .with_header_height(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "header_height", .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = TableConfig::new()
            .with_fetch_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { field: "fetch_timeout", .. }));
    }
}
