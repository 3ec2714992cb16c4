//! Shared helpers for mediator integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scrollgrid_lib::error::LoadError;
use scrollgrid_lib::loader::{BatchLoader, BatchResponse, LoadContext};
use scrollgrid_lib::model::{Cell, Column, Row};
use tokio::sync::oneshot;

pub type Reply = oneshot::Sender<Result<BatchResponse<u32>, LoadError>>;

#[derive(Default)]
struct ManualInner {
    calls: Vec<LoadContext>,
    waiting: VecDeque<(LoadContext, Reply)>,
}

/// Loader whose fetches stay pending until the test answers them.
#[derive(Clone, Default)]
pub struct ManualLoader {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the loader has been called.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Every context the loader was called with.
    pub fn calls(&self) -> Vec<LoadContext> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Wait for the next unanswered request.
    pub async fn next_request(&self) -> (LoadContext, Reply) {
        for _ in 0..1000 {
            if let Some(request) = self.inner.lock().unwrap().waiting.pop_front() {
                return request;
            }
            tokio::task::yield_now().await;
        }
        panic!("loader was never called");
    }

    /// Answer the next request with `count` rows starting at its offset.
    pub async fn reply_rows(&self, count: usize, is_last: bool) -> LoadContext {
        let (context, reply) = self.next_request().await;
        let batch = BatchResponse::new(rows(context.offset, count), is_last);
        let _ = reply.send(Ok(batch));
        context
    }

    /// Fail the next request.
    pub async fn reply_error(&self, message: &str) -> LoadContext {
        let (context, reply) = self.next_request().await;
        let _ = reply.send(Err(LoadError::failed(message)));
        context
    }
}

#[async_trait]
impl BatchLoader<u32> for ManualLoader {
    async fn load(&self, context: LoadContext) -> Result<BatchResponse<u32>, LoadError> {
        let (tx, rx) = oneshot::channel();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(context.clone());
            inner.waiting.push_back((context, tx));
        }
        rx.await
            .unwrap_or_else(|_| Err(LoadError::failed("reply dropped")))
    }
}

/// Rows with ids `start..start + count`, each carrying an `age` cell.
pub fn rows(start: usize, count: usize) -> Vec<Row<u32>> {
    (start..start + count)
        .map(|i| {
            let age = (i * 7 % 100) as u32;
            Row::new(i.to_string(), age).with_cell(Cell::new("age", age))
        })
        .collect()
}

/// A single sortable `age` column.
pub fn age_columns() -> Vec<Column> {
    vec![Column::new("age", "Age").width(50.0).sortable()]
}

/// The storybook "people" columns; only `age` and `lastName` are sortable.
pub fn people_columns() -> Vec<Column> {
    vec![
        Column::new("firstName", "First Name"),
        Column::new("lastName", "Last Name").sortable(),
        Column::new("age", "Age").width(50.0).sortable(),
    ]
}
