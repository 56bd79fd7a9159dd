//! The array data source boundary.

use super::{Dimension, Value, VariableInfo};
use crate::error::Result;

/// Read-only access to a self-describing gridded data file.
///
/// A source is owned by whoever opened it. Once [`ArraySource::close`] has
/// been called every other method fails with
/// [`NcTableError::Closed`](crate::error::NcTableError::Closed).
pub trait ArraySource: std::fmt::Debug {
    /// Human readable location used in log messages.
    fn location(&self) -> String;

    /// All dimensions defined by the source.
    fn dimensions(&self) -> Result<Vec<Dimension>>;

    /// All variables defined by the source.
    fn variables(&self) -> Result<Vec<VariableInfo>>;

    /// Look up a variable by its full name.
    fn variable(&self, name: &str) -> Result<Option<VariableInfo>>;

    /// Read the hyperslab starting at `origin` with extent `shape`.
    ///
    /// Values are returned in row-major order.
    fn read_slice(
        &self,
        variable: &VariableInfo,
        origin: &[usize],
        shape: &[usize],
    ) -> Result<Vec<Value>>;

    /// Release the underlying handle.
    fn close(&self);

    /// True once [`ArraySource::close`] has been called.
    fn is_closed(&self) -> bool;
}

/// Check that a hyperslab request fits inside a variable.
pub(crate) fn check_slice(
    variable: &VariableInfo,
    origin: &[usize],
    shape: &[usize],
) -> Result<()> {
    let dims = &variable.dimensions;
    let fits = origin.len() == dims.len()
        && shape.len() == dims.len()
        && dims
            .iter()
            .zip(origin.iter().zip(shape))
            .all(|(d, (&o, &s))| o + s <= d.len);
    if fits {
        Ok(())
    } else {
        Err(crate::error::NcTableError::NetCDF(format!(
            "Slice origin {:?} shape {:?} out of range for '{}' {:?}",
            origin,
            shape,
            variable.name,
            variable.shape()
        )))
    }
}
