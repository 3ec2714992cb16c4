//! Error types

mod load;
mod table;

pub use load::*;
pub use table::*;
