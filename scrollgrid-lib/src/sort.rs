//! Sort tracking for table columns.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Column;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Direction reached by one more header interaction.
    ///
    /// Unsorted columns start ascending; sorted columns alternate and are
    /// never cleared.
    pub fn next(current: Option<SortDirection>) -> SortDirection {
        match current {
            None | Some(SortDirection::Desc) => SortDirection::Asc,
            Some(SortDirection::Asc) => SortDirection::Desc,
        }
    }

    /// Uppercase wire form (`"ASC"` / `"DESC"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active sort: a column key and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column name.
    pub name: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a new sort spec.
    pub fn new(name: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    /// Ascending sort on a column.
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, SortDirection::Asc)
    }

    /// Descending sort on a column.
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, SortDirection::Desc)
    }
}

/// Ordered list of active sorts, primary first.
///
/// Holds at most one spec per column. Adding a sort for a column moves it
/// to the end of the list, making it the lowest priority.
///
/// # Example
///
/// ```
/// use scrollgrid_lib::model::Column;
/// use scrollgrid_lib::sort::{SortDirection, SortTracker};
///
/// let columns = vec![
///     Column::new("last", "Last").sortable(),
///     Column::new("age", "Age").sortable(),
/// ];
/// let mut tracker = SortTracker::new(&columns);
///
/// tracker.add("age", SortDirection::Desc);
/// tracker.add("last", SortDirection::Asc);
/// tracker.add("age", SortDirection::Asc);
///
/// let names: Vec<_> = tracker.specs().iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["last", "age"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SortTracker {
    sortable: Vec<String>,
    specs: Vec<SortSpec>,
}

impl SortTracker {
    /// Create an empty tracker accepting the sortable columns of `columns`.
    pub fn new(columns: &[Column]) -> Self {
        Self {
            sortable: columns
                .iter()
                .filter(|c| c.can_sort)
                .map(|c| c.name.clone())
                .collect(),
            specs: Vec::new(),
        }
    }

    /// Returns `true` if the column exists and allows sorting.
    pub fn can_sort(&self, name: &str) -> bool {
        self.sortable.iter().any(|n| n == name)
    }

    /// Add or move a sort to the lowest-priority position.
    ///
    /// Returns `false` without touching the list when the column cannot be
    /// sorted.
    pub fn add(&mut self, name: &str, direction: SortDirection) -> bool {
        if !self.can_sort(name) {
            return false;
        }

        self.specs.retain(|s| s.name != name);
        self.specs.push(SortSpec::new(name, direction));
        true
    }

    /// Apply the header toggle policy to a column.
    ///
    /// Returns the direction applied, or `None` when the column cannot be
    /// sorted.
    pub fn toggle(&mut self, name: &str) -> Option<SortDirection> {
        let direction = SortDirection::next(self.direction(name));
        self.add(name, direction).then_some(direction)
    }

    /// Active direction for a column, if it is sorted.
    pub fn direction(&self, name: &str) -> Option<SortDirection> {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.direction)
    }

    /// Active sorts, primary first.
    pub fn specs(&self) -> &[SortSpec] {
        &self.specs
    }

    /// Returns `true` if no sort is active.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
