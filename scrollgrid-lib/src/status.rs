//! Loading status of a table.

use serde::Deserialize;
use serde::Serialize;

/// Where the batch loader currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// Idle; more data may be requested.
    #[default]
    Ready,
    /// A fetch is in flight.
    Pending,
    /// The source reported its last batch for the current sort.
    Disabled,
    /// The last fetch failed; requesting again retries it.
    Error,
}

impl LoadStatus {
    /// Returns `true` if a new fetch may start from this status.
    pub fn can_load(&self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }

    /// Returns `true` once every batch for the current sort is loaded.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Short label for a status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Idle",
            Self::Pending => "Loading",
            Self::Disabled => "Complete",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
