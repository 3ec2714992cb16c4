//! Table data model.
//!
//! Passive value types describing columns, loaded rows and their cells.

mod column;
mod row;
mod value;

pub use column::*;
pub use row::*;
pub use value::*;
