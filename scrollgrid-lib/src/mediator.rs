//! Table mediator.
//!
//! Composes the sort tracker, row store and load state machine for one table
//! session and publishes their changes to the rendering layer.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;

use crate::config::TableConfig;
use crate::error::{LoadError, TableError};
use crate::layout::{ScrollPosition, ScrollerLayout};
use crate::loader::{BatchLoader, BatchResponse, FetchHandle, LoadContext, LoadMachine};
use crate::model::{content_width, validate_columns, Column, Row};
use crate::sort::{SortDirection, SortSpec, SortTracker};
use crate::status::LoadStatus;
use crate::store::RowStore;
use crate::subscription::{Channel, Subscription};
use crate::window::{rows_within_range, Range, WindowedRow};

/// Mutable state guarded by the mediator's lock.
struct TableState<T> {
    sorts: SortTracker,
    store: RowStore<T>,
    machine: LoadMachine,
    last_error: Option<Arc<LoadError>>,
    viewport: Range,
    /// Bumped by every change that publishes notifications.
    version: u64,
}

impl<T> TableState<T> {
    fn next_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }

    /// Move the machine to `Pending` and describe the fetch to start.
    fn begin_fetch(&mut self) -> Option<LoadContext> {
        let generation = self.store.generation();
        if !self.machine.begin(generation) {
            log::debug!(
                "load request ignored while {:?} (generation {})",
                self.machine.status(),
                generation
            );
            return None;
        }
        Some(LoadContext {
            sorts: self.sorts.specs().to_vec(),
            offset: self.store.len(),
            generation,
        })
    }
}

struct Shared<T> {
    columns: Vec<Column>,
    content_width: f64,
    config: TableConfig,
    loader: Arc<dyn BatchLoader<T>>,
    runtime: Handle,
    state: Mutex<TableState<T>>,
    sort_changed: Channel<[SortSpec]>,
    rows_changed: Channel<[Arc<Row<T>>]>,
    status_changed: Channel<LoadStatus>,
}

/// Notifications gathered under the lock and delivered after releasing it.
///
/// Delivery stops as soon as the state moves past `version`, so a listener
/// that re-enters the mediator never has its newer events followed by older
/// ones.
struct Notifications<T> {
    version: u64,
    sorts: Option<Vec<SortSpec>>,
    rows: Option<Vec<Arc<Row<T>>>>,
    statuses: Vec<LoadStatus>,
}

impl<T> Notifications<T> {
    fn new(version: u64) -> Self {
        Self {
            version,
            sorts: None,
            rows: None,
            statuses: Vec::new(),
        }
    }
}

/// Mediator between a paged data source and a virtualized table renderer.
///
/// One mediator serves one table session: a fixed set of columns and a single
/// loader. Cloning yields another handle to the same session.
///
/// No operation returns an error once the mediator is built. Failed fetches
/// show up as [`LoadStatus::Error`] with the cause in
/// [`last_error`](Self::last_error); requests that do not apply (sorting an
/// unsortable column, loading while a fetch is pending or after the last
/// batch) are ignored.
///
/// # Example
///
/// ```
/// use scrollgrid_lib::error::LoadError;
/// use scrollgrid_lib::loader::{from_fn, BatchResponse, LoadContext};
/// use scrollgrid_lib::mediator::TableMediator;
/// use scrollgrid_lib::model::{Column, Row};
/// use scrollgrid_lib::status::LoadStatus;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let loader = from_fn(|cx: LoadContext| async move {
///     let rows = (cx.offset..cx.offset + 10).map(|i| Row::new(i.to_string(), i)).collect();
///     Ok::<_, LoadError>(BatchResponse::last(rows))
/// });
///
/// let table = TableMediator::new(vec![Column::new("id", "Id")], loader).unwrap();
/// if let Some(fetch) = table.load_next_batch() {
///     fetch.wait().await;
/// }
///
/// assert_eq!(table.loaded_rows_len(), 10);
/// assert_eq!(table.loading_state(), LoadStatus::Disabled);
/// # }
/// ```
pub struct TableMediator<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for TableMediator<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Builder for [`TableMediator`].
pub struct TableBuilder<T> {
    columns: Vec<Column>,
    loader: Arc<dyn BatchLoader<T>>,
    config: TableConfig,
    runtime: Option<Handle>,
}

impl<T: Send + Sync + 'static> TableBuilder<T> {
    /// Use the given configuration instead of the default.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Run fetches on this runtime instead of the current one.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Validate the columns and configuration and create the mediator.
    pub fn build(self) -> Result<TableMediator<T>, TableError> {
        validate_columns(&self.columns)?;
        self.config.validate()?;

        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| TableError::NoRuntime)?,
        };

        log::debug!(
            "building table with {} columns ({} sortable)",
            self.columns.len(),
            self.columns.iter().filter(|c| c.can_sort).count()
        );

        let state = TableState {
            sorts: SortTracker::new(&self.columns),
            store: RowStore::new(),
            machine: LoadMachine::new(),
            last_error: None,
            viewport: Range::default(),
            version: 0,
        };

        Ok(TableMediator {
            shared: Arc::new(Shared {
                content_width: content_width(&self.columns),
                columns: self.columns,
                config: self.config,
                loader: self.loader,
                runtime,
                state: Mutex::new(state),
                sort_changed: Channel::new(),
                rows_changed: Channel::new(),
                status_changed: Channel::new(),
            }),
        })
    }
}

impl<T: Send + Sync + 'static> TableMediator<T> {
    /// Start building a mediator for `columns` fed by `loader`.
    pub fn builder<L>(columns: Vec<Column>, loader: L) -> TableBuilder<T>
    where
        L: BatchLoader<T> + 'static,
    {
        TableBuilder {
            columns,
            loader: Arc::new(loader),
            config: TableConfig::default(),
            runtime: None,
        }
    }

    /// Build a mediator with the default configuration on the current runtime.
    pub fn new<L>(columns: Vec<Column>, loader: L) -> Result<Self, TableError>
    where
        L: BatchLoader<T> + 'static,
    {
        Self::builder(columns, loader).build()
    }

    fn state(&self) -> MutexGuard<'_, TableState<T>> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_latest(&self, version: u64) -> bool {
        let current = self.state().version;
        if current != version {
            log::debug!(
                "dropping notifications for version {} (current {})",
                version,
                current
            );
        }
        current == version
    }

    fn publish(&self, pending: Notifications<T>) {
        let version = pending.version;
        if let Some(sorts) = pending.sorts {
            if !self.is_latest(version) {
                return;
            }
            self.shared.sort_changed.emit(&sorts);
        }
        if let Some(rows) = pending.rows {
            if !self.is_latest(version) {
                return;
            }
            self.shared.rows_changed.emit(&rows);
        }
        for status in pending.statuses {
            if !self.is_latest(version) {
                return;
            }
            self.shared.status_changed.emit(&status);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Column definitions, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.shared.columns
    }

    /// Configuration the table was built with.
    pub fn config(&self) -> &TableConfig {
        &self.shared.config
    }

    /// Sum of all column widths.
    pub fn content_width(&self) -> f64 {
        self.shared.content_width
    }

    /// Number of rows loaded in the current cycle.
    pub fn loaded_rows_len(&self) -> usize {
        self.state().store.len()
    }

    /// Current loading status.
    pub fn loading_state(&self) -> LoadStatus {
        self.state().machine.status()
    }

    /// Cause of the most recent failed fetch, cleared by the next success or
    /// sort change.
    pub fn last_error(&self) -> Option<Arc<LoadError>> {
        self.state().last_error.clone()
    }

    /// Current load cycle.
    pub fn generation(&self) -> u64 {
        self.state().store.generation()
    }

    /// Snapshot of all loaded rows.
    pub fn rows(&self) -> Vec<Arc<Row<T>>> {
        self.state().store.rows().to_vec()
    }

    /// Active sorts, primary first.
    pub fn sorts(&self) -> Vec<SortSpec> {
        self.state().sorts.specs().to_vec()
    }

    /// Active direction for a column, if it is sorted.
    pub fn sort_direction(&self, name: &str) -> Option<SortDirection> {
        self.state().sorts.direction(name)
    }

    /// Direction a header indicator should show; unsorted columns read as
    /// ascending.
    pub fn display_direction(&self, name: &str) -> SortDirection {
        self.sort_direction(name).unwrap_or(SortDirection::Asc)
    }

    // =========================================================================
    // Windowing
    // =========================================================================

    /// Loaded rows intersecting `[start_y, end_y]`, with their placement.
    pub fn rows_within_range(
        &self,
        header_offset: f64,
        row_height: f64,
        start_y: f64,
        end_y: f64,
    ) -> Vec<WindowedRow<T>> {
        let state = self.state();
        rows_within_range(
            state.store.rows(),
            header_offset,
            row_height,
            start_y,
            end_y,
            self.shared.content_width,
        )
    }

    /// Geometry of the scroll content, from the configured heights.
    pub fn layout(&self) -> ScrollerLayout {
        ScrollerLayout::from_config(&self.shared.config)
    }

    /// Last viewport reported through [`set_viewport`](Self::set_viewport) or
    /// [`handle_scroll`](Self::handle_scroll).
    pub fn viewport(&self) -> Range {
        self.state().viewport
    }

    /// Record the viewport the renderer currently shows.
    pub fn set_viewport(&self, range: Range) {
        self.state().viewport = range;
    }

    /// Rows inside the recorded viewport, using the configured heights.
    pub fn visible_rows(&self) -> Vec<WindowedRow<T>> {
        let config = &self.shared.config;
        let state = self.state();
        rows_within_range(
            state.store.rows(),
            config.header_height,
            config.row_height,
            state.viewport.start_y,
            state.viewport.end_y,
            self.shared.content_width,
        )
    }

    /// Record a scroll event; requests the next batch when it reaches the
    /// bottom of the content.
    pub fn handle_scroll(&self, position: ScrollPosition) -> Option<FetchHandle> {
        self.set_viewport(position.range());
        if position.at_bottom() {
            self.load_next_batch()
        } else {
            None
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Request the next batch.
    ///
    /// Does nothing unless the status is `Ready` or `Error`, so repeated calls
    /// while a fetch is pending never reach the loader twice.
    pub fn load_next_batch(&self) -> Option<FetchHandle> {
        let (pending, context) = {
            let mut state = self.state();
            let context = state.begin_fetch()?;
            let mut pending = Notifications::new(state.next_version());
            pending.statuses.push(LoadStatus::Pending);
            (pending, context)
        };

        let fetch = self.spawn_fetch(context);
        self.publish(pending);
        Some(fetch)
    }

    fn spawn_fetch(&self, context: LoadContext) -> FetchHandle {
        log::debug!(
            "loading batch at offset {} (generation {}, {} sorts)",
            context.offset,
            context.generation,
            context.sorts.len()
        );

        let generation = context.generation;
        let loader = Arc::clone(&self.shared.loader);
        let timeout = self.shared.config.fetch_timeout;
        let table = self.clone();

        let task = self.shared.runtime.spawn(async move {
            // Panics in the loader or the timer surface as a JoinError here.
            let fetch = tokio::spawn(async move {
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, loader.load(context))
                        .await
                        .unwrap_or(Err(LoadError::Timeout(limit))),
                    None => loader.load(context).await,
                }
            });

            let result = fetch
                .await
                .unwrap_or_else(|e| Err(LoadError::Aborted(e.to_string())));
            table.resolve(generation, result);
        });

        FetchHandle::new(generation, task)
    }

    fn resolve(&self, generation: u64, result: Result<BatchResponse<T>, LoadError>) {
        let pending = {
            let mut state = self.state();
            if state.store.generation() != generation || !state.machine.is_current(generation) {
                log::debug!(
                    "discarding stale batch for generation {} (current {})",
                    generation,
                    state.store.generation()
                );
                return;
            }

            match result {
                Ok(response) => {
                    let is_last = response.is_last;
                    let added = state.store.append(response.data);
                    state.machine.resolve(generation, is_last);
                    state.last_error = None;
                    log::debug!(
                        "appended {} rows ({} loaded, last: {})",
                        added,
                        state.store.len(),
                        is_last
                    );
                    let mut pending = Notifications::new(state.next_version());
                    pending.rows = Some(state.store.rows().to_vec());
                    pending.statuses.push(state.machine.status());
                    pending
                }
                Err(e) => {
                    log::warn!("batch load failed at offset {}: {}", state.store.len(), e);
                    state.machine.reject(generation);
                    state.last_error = Some(Arc::new(e));
                    let mut pending = Notifications::new(state.next_version());
                    pending.statuses.push(LoadStatus::Error);
                    pending
                }
            }
        };

        self.publish(pending);
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sort by `name` in `direction`, moving it to the lowest priority.
    ///
    /// Ignored for unknown or unsortable columns. Otherwise the loaded rows are
    /// discarded and a fresh load starts, whose handle is returned.
    pub fn add_sort(&self, name: &str, direction: SortDirection) -> Option<FetchHandle> {
        self.mutate_sort(name, |sorts| sorts.add(name, direction))
    }

    /// Advance a column through the header toggle policy: unsorted and
    /// descending columns become ascending, ascending ones descending.
    pub fn toggle_sort(&self, name: &str) -> Option<FetchHandle> {
        self.mutate_sort(name, |sorts| sorts.toggle(name).is_some())
    }

    fn mutate_sort<F>(&self, name: &str, apply: F) -> Option<FetchHandle>
    where
        F: FnOnce(&mut SortTracker) -> bool,
    {
        let (pending, context) = {
            let mut state = self.state();
            if !apply(&mut state.sorts) {
                log::debug!("sort ignored for column {:?}", name);
                return None;
            }

            state.store.clear();
            state.machine.reset();
            state.last_error = None;
            log::debug!(
                "sort changed to {:?}; starting generation {}",
                state.sorts.specs(),
                state.store.generation()
            );

            let mut pending = Notifications::new(state.next_version());
            pending.sorts = Some(state.sorts.specs().to_vec());
            pending.rows = Some(Vec::new());
            pending.statuses.push(LoadStatus::Ready);

            // The fresh load starts under the same lock, so nothing can
            // claim the cycle between the reset and the fetch.
            let context = state.begin_fetch();
            if context.is_some() {
                pending.statuses.push(LoadStatus::Pending);
            }
            (pending, context)
        };

        let fetch = context.map(|context| self.spawn_fetch(context));
        self.publish(pending);
        fetch
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Listen for sort changes; receives the full active sort list.
    pub fn on_sort_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[SortSpec]) + Send + Sync + 'static,
    {
        self.shared.sort_changed.subscribe(listener)
    }

    /// Listen for row changes; receives every loaded row.
    pub fn on_rows_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Arc<Row<T>>]) + Send + Sync + 'static,
    {
        self.shared.rows_changed.subscribe(listener)
    }

    /// Listen for status transitions.
    pub fn on_status_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&LoadStatus) + Send + Sync + 'static,
    {
        self.shared.status_changed.subscribe(listener)
    }
}

impl<T> std::fmt::Debug for TableMediator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f.debug_struct("TableMediator")
            .field("columns", &self.shared.columns.len())
            .field("loaded", &state.store.len())
            .field("generation", &state.store.generation())
            .field("status", &state.machine.status())
            .field("sorts", &state.sorts.specs())
            .finish()
    }
}
