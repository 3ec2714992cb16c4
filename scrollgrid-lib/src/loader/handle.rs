//! Handle for an in-flight fetch.

use tokio::task::JoinHandle;

/// Handle to a fetch started by the mediator.
///
/// Awaiting it is optional: the result is applied to the table either way.
/// Dropping the handle does not cancel the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl FetchHandle {
    pub(crate) fn new(generation: u64, task: JoinHandle<()>) -> Self {
        Self { generation, task }
    }

    /// Load cycle the fetch belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` once the result has been applied or discarded.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the fetch's result has been applied or discarded.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            log::warn!(
                "fetch task for generation {} ended abnormally: {}",
                self.generation,
                e
            );
        }
    }
}
