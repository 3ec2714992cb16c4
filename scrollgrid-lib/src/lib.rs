//! Windowed, incrementally loaded table data.
//!
//! `scrollgrid-lib` sits between a paged data source and a virtualized table
//! renderer. It keeps the rows loaded so far, fetches more in batches as the
//! user scrolls, restarts loading whenever the sort order changes, and tells
//! the renderer which rows fall inside its viewport.
//!
//! Rendering, input handling and the data source itself stay outside; the
//! renderer talks to a [`TableMediator`] and subscribes to its change
//! channels.

pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod mediator;
pub mod model;
pub mod sort;
pub mod status;
pub mod store;
pub mod subscription;
pub mod window;

pub use mediator::TableBuilder;
pub use mediator::TableMediator;
