//! Scroll container geometry.
//!
//! Derived measurements a renderer needs to size the scrollable content,
//! place the loading placeholder and decide when the user has reached the
//! bottom.

use crate::config::TableConfig;
use crate::status::LoadStatus;
use crate::window::Range;

/// Scroll state of the container reported by the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    /// Distance scrolled from the top.
    pub scroll_top: f64,
    /// Total scrollable height.
    pub scroll_height: f64,
    /// Height of the visible area.
    pub viewport_height: f64,
}

impl ScrollPosition {
    /// Creates a new scroll position.
    pub fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Viewport range this position covers.
    pub fn range(&self) -> Range {
        Range::from_scroll(self.scroll_top, self.viewport_height)
    }

    /// Returns `true` when scrolled all the way down.
    ///
    /// Compares with `>=` so fractional scroll offsets still count.
    pub fn at_bottom(&self) -> bool {
        self.scroll_top >= self.scroll_height - self.viewport_height
    }
}

/// Pixel geometry of the table's scroll content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollerLayout {
    pub header_height: f64,
    pub row_height: f64,
    pub status_height: f64,
}

impl ScrollerLayout {
    /// Layout using the heights from `config`.
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            header_height: config.header_height,
            row_height: config.row_height,
            status_height: config.status_height,
        }
    }

    /// Height occupied by `loaded` rows.
    pub fn rows_height(&self, loaded: usize) -> f64 {
        loaded as f64 * self.row_height
    }

    /// Total scrollable content height.
    ///
    /// Room for the loading placeholder is kept until the last batch arrives.
    pub fn content_height(&self, loaded: usize, status: LoadStatus) -> f64 {
        let status_height = if status.is_finished() {
            0.0
        } else {
            self.status_height
        };
        self.rows_height(loaded) + self.header_height + status_height
    }

    /// Top of the loading placeholder, shown only while a fetch is pending.
    pub fn loading_row_y(&self, loaded: usize, status: LoadStatus) -> Option<f64> {
        (status == LoadStatus::Pending).then(|| self.rows_height(loaded) + self.header_height)
    }
}

impl Default for ScrollerLayout {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}
