//! nctable - Page through multi-dimensional netCDF variables as a flat table.
//!
//! nctable presents one or more variables that share the same dimensions as
//! a single two-dimensional table. Each row is one combination of dimension
//! indexes in row-major order; the leading columns hold the coordinate value
//! of each dimension and the remaining columns hold the variable values.
//!
//! # Features
//!
//! - Lazy, cell-by-cell reads from netCDF files
//! - Coordinate columns decoded from coordinate variables
//! - CF time decoding for the common calendars
//! - Fixed-length character arrays presented as strings
//! - Paged access for very large tables
//! - Terminal pager and tab-separated dump
//!
//! # Example
//!
//! ```ignore
//! use nctable::data::NetcdfSource;
//! use nctable::table::{CoordinateResolver, TableView};
//! use std::path::Path;
//! use std::rc::Rc;
//!
//! let source = Rc::new(NetcdfSource::open(Path::new("tas.nc"))?);
//! let mut view = TableView::new(source, CoordinateResolver::default());
//! view.add_variables(["tas", "pr"])?;
//! println!("{} rows: {:?}", view.row_count(), view.labels());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod data;
pub mod dump;
pub mod error;
pub mod table;
pub mod ui;

pub use error::{NcTableError, Result};
