//! Flat tables over multi-dimensional variables.
//!
//! A [`TableView`] presents congruent variables as columns of a single
//! table whose rows enumerate every combination of the shared dimensions.
//! Cells are read from the source one at a time; nothing beyond a
//! dimension's coordinate labels is held in memory. [`PagedTable`] exposes
//! the view a page at a time.

mod column;
mod coordinate;
mod index;
mod pager;
mod time;
mod view;

pub use column::{Column, ColumnKind, VariableColumn};
pub use coordinate::{is_congruent, CoordinateResolver};
pub use index::{CartesianProduct, RowIndex};
pub use pager::{PagedTable, Pager, RowCount};
pub use time::{Calendar, TimeUnits};
pub use view::TableView;
