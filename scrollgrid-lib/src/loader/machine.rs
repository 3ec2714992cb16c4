//! Loading status transitions.

use crate::status::LoadStatus;

/// State machine guarding batch fetches.
///
/// ```text
/// Ready | Error --begin--> Pending --resolve--> Ready | Disabled
///                                  --reject---> Error
/// any --reset--> Ready
/// ```
///
/// Each fetch is tagged with the load generation it was started for;
/// transitions for any other generation are refused.
#[derive(Debug, Clone, Default)]
pub struct LoadMachine {
    status: LoadStatus,
    in_flight: Option<u64>,
}

impl LoadMachine {
    /// Create a machine in the `Ready` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Generation of the pending fetch, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Start a fetch for `generation`.
    ///
    /// Returns `false` (and changes nothing) unless the status is `Ready` or
    /// `Error`.
    pub fn begin(&mut self, generation: u64) -> bool {
        if !self.status.can_load() {
            return false;
        }
        self.status = LoadStatus::Pending;
        self.in_flight = Some(generation);
        true
    }

    /// Returns `true` if `generation` is the fetch currently pending.
    pub fn is_current(&self, generation: u64) -> bool {
        self.status == LoadStatus::Pending && self.in_flight == Some(generation)
    }

    /// Complete the pending fetch successfully.
    pub fn resolve(&mut self, generation: u64, is_last: bool) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.status = if is_last {
            LoadStatus::Disabled
        } else {
            LoadStatus::Ready
        };
        self.in_flight = None;
        true
    }

    /// Fail the pending fetch.
    pub fn reject(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.status = LoadStatus::Error;
        self.in_flight = None;
        true
    }

    /// Forget any pending fetch and return to `Ready`.
    pub fn reset(&mut self) {
        self.status = LoadStatus::Ready;
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_from_ready_or_error() {
        let mut m = LoadMachine::new();
        assert!(m.begin(0));
        assert_eq!(m.status(), LoadStatus::Pending);
        assert!(!m.begin(0), "second fetch while pending");

        assert!(m.reject(0));
        assert_eq!(m.status(), LoadStatus::Error);
        assert!(m.begin(0), "retry from error");

        assert!(m.resolve(0, true));
        assert_eq!(m.status(), LoadStatus::Disabled);
        assert!(!m.begin(0), "disabled is terminal");
    }

    #[test]
    fn test_resolve_more_returns_to_ready() {
        let mut m = LoadMachine::new();
        m.begin(3);
        assert!(m.resolve(3, false));
        assert_eq!(m.status(), LoadStatus::Ready);
        assert_eq!(m.in_flight(), None);
    }

    #[test]
    fn test_stale_generation_refused() {
        let mut m = LoadMachine::new();
        m.begin(0);
        m.reset();
        m.begin(1);

        assert!(!m.resolve(0, false));
        assert!(!m.reject(0));
        assert_eq!(m.status(), LoadStatus::Pending);
        assert_eq!(m.in_flight(), Some(1));
    }

    #[test]
    fn test_reset_reopens_disabled() {
        let mut m = LoadMachine::new();
        m.begin(0);
        m.resolve(0, true);
        m.reset();
        assert_eq!(m.status(), LoadStatus::Ready);
        assert!(m.begin(1));
    }

    #[test]
    fn test_resolve_without_begin_refused() {
        let mut m = LoadMachine::new();
        assert!(!m.resolve(0, false));
        assert_eq!(m.status(), LoadStatus::Ready);
    }
}
