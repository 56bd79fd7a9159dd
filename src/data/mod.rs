//! Data sources and the types they describe.
//!
//! This module defines the read-only array source boundary the table is
//! built on, a NetCDF implementation of it, and an in-memory one.

mod memory;
mod netcdf_source;
mod source;
mod types;

pub use memory::MemorySource;
pub use netcdf_source::NetcdfSource;
pub use source::ArraySource;
pub use types::{ColumnType, Dimension, ElementType, Value, VariableInfo};
