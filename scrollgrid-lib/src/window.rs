//! Viewport windowing.
//!
//! Maps a vertical pixel range onto the contiguous slice of loaded rows that
//! intersects it. All rows share one height, so the mapping is two divisions
//! rather than a search over cumulative offsets. Columns are never windowed:
//! every visible row spans the full content width.

use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;

/// Vertical viewport bounds reported by the rendering layer, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start_y: f64,
    pub end_y: f64,
}

impl Range {
    /// Creates a new range.
    pub fn new(start_y: f64, end_y: f64) -> Self {
        Self { start_y, end_y }
    }

    /// Range covered by a scroll container scrolled to `scroll_top`.
    pub fn from_scroll(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            start_y: scroll_top,
            end_y: scroll_top + viewport_height,
        }
    }

    /// Height of the range.
    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }
}

/// Absolute placement of a row inside the scrollable content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A visible row together with its index and pixel placement.
#[derive(Debug)]
pub struct WindowedRow<T> {
    /// Position in the row store.
    pub index: usize,
    /// The row itself.
    pub row: Arc<Row<T>>,
    /// Where to draw it.
    pub rect: Rect,
}

impl<T> Clone for WindowedRow<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            row: Arc::clone(&self.row),
            rect: self.rect,
        }
    }
}

/// Indices of the rows intersecting `[start_y, end_y]`.
///
/// Returns `None` for an empty or out-of-range viewport, an empty table, or
/// a row height that is not a positive finite number.
pub fn visible_index_range(
    len: usize,
    header_offset: f64,
    row_height: f64,
    start_y: f64,
    end_y: f64,
) -> Option<RangeInclusive<usize>> {
    if len == 0 || !row_height.is_finite() || row_height <= 0.0 {
        return None;
    }
    if !(header_offset.is_finite() && start_y.is_finite() && end_y.is_finite()) {
        return None;
    }
    if start_y > end_y {
        return None;
    }

    let start = ((start_y - header_offset) / row_height).floor().max(0.0);
    let end = ((end_y - header_offset) / row_height)
        .ceil()
        .min((len - 1) as f64);

    if end < 0.0 || start > end {
        return None;
    }

    Some(start as usize..=end as usize)
}

/// Rows of `rows` intersecting the viewport, each with its absolute rect.
///
/// `header_offset` is the height of content above the first row; it is
/// removed from the viewport before indexing and added back to each row's
/// `y`. Every rect has `x = 0` and spans `content_width`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use scrollgrid_lib::model::Row;
/// use scrollgrid_lib::window::rows_within_range;
///
/// let rows: Vec<_> = (0..3).map(|i| Arc::new(Row::new(i.to_string(), i))).collect();
/// let visible = rows_within_range(&rows, 0.0, 40.0, 0.0, 100.0, 250.0);
///
/// let indices: Vec<_> = visible.iter().map(|w| w.index).collect();
/// assert_eq!(indices, [0, 1, 2]);
/// assert_eq!(visible[2].rect.y, 80.0);
/// ```
pub fn rows_within_range<T>(
    rows: &[Arc<Row<T>>],
    header_offset: f64,
    row_height: f64,
    start_y: f64,
    end_y: f64,
    content_width: f64,
) -> Vec<WindowedRow<T>> {
    let Some(indices) = visible_index_range(rows.len(), header_offset, row_height, start_y, end_y)
    else {
        return Vec::new();
    };

    indices
        .map(|index| WindowedRow {
            index,
            row: Arc::clone(&rows[index]),
            rect: Rect {
                x: 0.0,
                y: index as f64 * row_height + header_offset,
                width: content_width,
                height: row_height,
            },
        })
        .collect()
}
