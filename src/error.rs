//! Error types for nctable.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nctable operations.
pub type Result<T> = std::result::Result<T, NcTableError>;

/// Errors that can occur while building or reading a table view.
#[derive(Debug, Error)]
pub enum NcTableError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Requested variable is not present in the source.
    #[error("Unknown variable: {name}")]
    UnknownVariable {
        /// Requested variable name.
        name: String,
    },

    /// Variable dimensions do not match the dimensions of the table.
    #[error(
        "Cannot add incongruent variable '{name}' to table: \
         expected dimensions [{expected}], found [{found}]"
    )]
    IncongruentVariable {
        /// Rejected variable name.
        name: String,
        /// Dimension names already established for the table.
        expected: String,
        /// Public dimension names of the rejected variable.
        found: String,
    },

    /// Variable element type cannot be shown in a table.
    #[error("Unsupported type for variable '{name}': {vartype}")]
    UnsupportedType {
        /// Variable name.
        name: String,
        /// Description of the stored type.
        vartype: String,
    },

    /// A dimension's namesake variable is not one-dimensional.
    #[error("Invalid coordinate variable '{name}': rank {rank} is not 1")]
    InvalidCoordinateVariable {
        /// Coordinate variable name.
        name: String,
        /// Rank of the public dimensions.
        rank: usize,
    },

    /// A variable dimension could not be located in the table dimensions.
    #[error("Incompatible dimensions: '{dimension}' of '{variable}' is not a table dimension")]
    IncompatibleDimensions {
        /// Variable name.
        variable: String,
        /// Dimension that could not be located.
        dimension: String,
    },

    /// The underlying source has been closed.
    #[error("Data source is closed")]
    Closed,

    /// Units attribute is not a valid `<unit> since <timestamp>` string.
    #[error("Invalid time units: {units}")]
    InvalidTimeUnits {
        /// Offending units string.
        units: String,
    },

    /// Row index is outside the table.
    #[error("Row {row} out of bounds for table with {rows} rows")]
    RowOutOfBounds {
        /// Requested row.
        row: usize,
        /// Number of rows in the table.
        rows: usize,
    },

    /// Column index is outside the table.
    #[error("Column {column} out of bounds for table with {columns} columns")]
    ColumnOutOfBounds {
        /// Requested column.
        column: usize,
        /// Number of columns in the table.
        columns: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NcTableError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an UnknownVariable error.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create an InvalidTimeUnits error.
    pub fn invalid_time_units(units: impl Into<String>) -> Self {
        Self::InvalidTimeUnits {
            units: units.into(),
        }
    }

    /// True for errors caused by a rejected variable selection, as opposed
    /// to IO failures or internal faults.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownVariable { .. }
                | Self::IncongruentVariable { .. }
                | Self::InvalidCoordinateVariable { .. }
                | Self::UnsupportedType { .. }
        )
    }
}

impl From<netcdf::Error> for NcTableError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
