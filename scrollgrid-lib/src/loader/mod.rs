//! Batch loading.
//!
//! The external data source is reached through [`BatchLoader`]. Each call
//! receives the active sorts and the number of rows already loaded, and
//! answers with one [`BatchResponse`]. [`LoadMachine`] tracks where loading
//! stands so that at most one fetch is ever in flight.

mod handle;
mod machine;

pub use handle::FetchHandle;
pub use machine::LoadMachine;

use std::future::Future;

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::Row;
use crate::sort::SortSpec;

/// What the loader needs to know to produce the next batch.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadContext {
    /// Active sorts, primary first.
    pub sorts: Vec<SortSpec>,
    /// Rows already loaded in this cycle; the next batch starts here.
    pub offset: usize,
    /// Load cycle this request belongs to.
    pub generation: u64,
}

/// One fetch's worth of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResponse<T> {
    /// Rows in display order.
    pub data: Vec<Row<T>>,
    /// `true` when no further rows exist for the current sort.
    pub is_last: bool,
}

impl<T> BatchResponse<T> {
    /// Creates a new response.
    pub fn new(data: Vec<Row<T>>, is_last: bool) -> Self {
        Self { data, is_last }
    }

    /// A batch after which more rows are available.
    pub fn more(data: Vec<Row<T>>) -> Self {
        Self::new(data, false)
    }

    /// The final batch.
    pub fn last(data: Vec<Row<T>>) -> Self {
        Self::new(data, true)
    }

    /// Number of rows in the batch.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Source of row batches.
///
/// Implementations must tolerate being called again with the same context
/// after a failed attempt.
///
/// # Example
///
/// ```ignore
/// struct Api { client: HttpClient }
///
/// #[async_trait]
/// impl BatchLoader<Person> for Api {
///     async fn load(&self, cx: LoadContext) -> Result<BatchResponse<Person>, LoadError> {
///         let page = self.client.people(cx.offset, &cx.sorts).await.map_err(LoadError::source)?;
///         Ok(BatchResponse::new(page.rows, !page.has_more))
///     }
/// }
/// ```
#[async_trait]
pub trait BatchLoader<T>: Send + Sync {
    /// Fetch the batch starting at `context.offset`.
    async fn load(&self, context: LoadContext) -> Result<BatchResponse<T>, LoadError>;
}

/// Loader backed by an async closure. See [`from_fn`].
pub struct FnLoader<F> {
    f: F,
}

/// Build a loader from a closure returning a future.
///
/// ```
/// use scrollgrid_lib::error::LoadError;
/// use scrollgrid_lib::loader::{from_fn, BatchResponse, LoadContext};
/// use scrollgrid_lib::model::Row;
///
/// let loader = from_fn(|cx: LoadContext| async move {
///     let rows = (cx.offset..cx.offset + 20)
///         .map(|i| Row::new(i.to_string(), i))
///         .collect();
///     Ok::<_, LoadError>(BatchResponse::new(rows, cx.offset >= 100))
/// });
/// # let _ = loader;
/// ```
pub fn from_fn<T, F, Fut>(f: F) -> FnLoader<F>
where
    F: Fn(LoadContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<BatchResponse<T>, LoadError>> + Send + 'static,
{
    FnLoader { f }
}

#[async_trait]
impl<T, F, Fut> BatchLoader<T> for FnLoader<F>
where
    T: Send + 'static,
    F: Fn(LoadContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<BatchResponse<T>, LoadError>> + Send + 'static,
{
    async fn load(&self, context: LoadContext) -> Result<BatchResponse<T>, LoadError> {
        (self.f)(context).await
    }
}
