//! Table columns.
//!
//! A column maps a flattened row number to a single value. Dimension columns
//! hold either plain indexes or the resolved coordinate labels of their
//! dimension; variable columns read one element (or one fixed-length string)
//! from the source per cell.

use super::coordinate::CoordinateResolver;
use super::index::RowIndex;
use super::time::{Calendar, TimeUnits};
use crate::data::{ArraySource, ColumnType, Dimension, Value, VariableInfo};
use crate::error::{NcTableError, Result};

/// How a variable's raw values are presented.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    /// Values are returned as read.
    Data,
    /// Numeric offsets decoded to ISO 8601 timestamps.
    Time(TimeUnits),
    /// Character arrays decoded to strings of the given length.
    FixedString {
        /// Length of each string.
        length: usize,
    },
}

impl ColumnKind {
    /// Select the presentation for a variable. Time variables take
    /// precedence over character arrays.
    pub fn of(variable: &VariableInfo, default_calendar: Calendar) -> Self {
        if let Some(units) = TimeUnits::for_variable_with(variable, default_calendar) {
            Self::Time(units)
        } else if let Some(length) = variable.string_length() {
            Self::FixedString { length }
        } else {
            Self::Data
        }
    }

    /// Declared column type for a variable presented this way.
    pub fn column_type(&self, variable: &VariableInfo) -> ColumnType {
        match self {
            Self::Data => ColumnType::Native(variable.dtype),
            Self::Time(_) | Self::FixedString { .. } => ColumnType::String,
        }
    }
}

/// Decode a character slice to text. The string ends at the first NUL byte.
pub(crate) fn decode_text(chars: &[Value]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .filter_map(Value::as_char)
        .take_while(|&b| b != 0)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Read access to one variable through the table's dimension order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableColumn {
    variable: VariableInfo,
    /// Position of each public variable dimension in the table dimensions.
    axes: Vec<usize>,
    /// Extent read along each variable dimension.
    shape: Vec<usize>,
}

impl VariableColumn {
    /// Map a variable onto the table dimensions.
    pub fn new(variable: VariableInfo, dimensions: &[Dimension]) -> Result<Self> {
        let axes = variable
            .public_dimensions()
            .iter()
            .map(|dim| {
                dimensions
                    .iter()
                    .position(|d| d.same_axis(dim))
                    .ok_or_else(|| NcTableError::IncompatibleDimensions {
                        variable: variable.name.clone(),
                        dimension: dim.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let mut shape = vec![1; axes.len()];
        if let Some(length) = variable.string_length() {
            shape.push(length);
        }
        Ok(Self {
            variable,
            axes,
            shape,
        })
    }

    /// The backing variable.
    pub fn variable(&self) -> &VariableInfo {
        &self.variable
    }

    /// Table axis of each public variable dimension.
    pub fn axes(&self) -> &[usize] {
        &self.axes
    }

    /// Extent of a single-cell read.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Origin of the single-cell read for a table coordinate.
    pub fn origin(&self, coords: &[usize]) -> Vec<usize> {
        let mut origin: Vec<usize> = self.axes.iter().map(|&axis| coords[axis]).collect();
        if self.variable.is_array_string() {
            origin.push(0);
        }
        origin
    }

    fn read(&self, source: &dyn ArraySource, coords: &[usize]) -> Result<Vec<Value>> {
        source.read_slice(&self.variable, &self.origin(coords), &self.shape)
    }

    fn read_one(&self, source: &dyn ArraySource, coords: &[usize]) -> Result<Value> {
        self.read(source, coords)?.into_iter().next().ok_or_else(|| {
            NcTableError::NetCDF(format!("Empty read from {}", self.variable.name))
        })
    }
}

/// A single table column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Integer index of a dimension without a coordinate variable.
    Index {
        /// Dimension name.
        label: String,
        /// Table axis of the dimension.
        axis: usize,
    },
    /// Resolved labels of a dimension's coordinate variable.
    Coordinate {
        /// Coordinate variable name.
        label: String,
        /// Table axis of the dimension.
        axis: usize,
        /// Declared type of the labels.
        column_type: ColumnType,
        /// One label per dimension index.
        values: Vec<Value>,
    },
    /// Plain variable values.
    Data(VariableColumn),
    /// Time offsets decoded with the variable's own units and calendar.
    Time {
        /// Variable access.
        column: VariableColumn,
        /// Units used for decoding.
        units: TimeUnits,
    },
    /// Classic fixed-length strings.
    FixedString {
        /// Variable access.
        column: VariableColumn,
        /// Length of each string.
        length: usize,
    },
}

impl Column {
    /// Build the column for a table dimension.
    pub fn for_dimension(
        source: &dyn ArraySource,
        resolver: &CoordinateResolver,
        dimension: &Dimension,
        axis: usize,
    ) -> Result<Self> {
        match resolver.coordinate_variable(source, dimension)? {
            None => Ok(Self::Index {
                label: dimension.name.clone(),
                axis,
            }),
            Some(variable) => {
                let kind = ColumnKind::of(&variable, resolver.default_calendar());
                let values = resolver.resolve_variable(source, &variable, &kind)?;
                Ok(Self::Coordinate {
                    label: variable.name.clone(),
                    axis,
                    column_type: kind.column_type(&variable),
                    values,
                })
            },
        }
    }

    /// Build the column for a selected variable.
    pub fn for_variable(
        variable: VariableInfo,
        dimensions: &[Dimension],
        default_calendar: Calendar,
    ) -> Result<Self> {
        let kind = ColumnKind::of(&variable, default_calendar);
        let column = VariableColumn::new(variable, dimensions)?;
        Ok(match kind {
            ColumnKind::Data => Self::Data(column),
            ColumnKind::Time(units) => Self::Time { column, units },
            ColumnKind::FixedString { length } => Self::FixedString { column, length },
        })
    }

    /// Column label.
    pub fn label(&self) -> &str {
        match self {
            Self::Index { label, .. } | Self::Coordinate { label, .. } => label,
            Self::Data(column) | Self::Time { column, .. } | Self::FixedString { column, .. } => {
                &column.variable.name
            },
        }
    }

    /// Declared value type.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Index { .. } => ColumnType::Index,
            Self::Coordinate { column_type, .. } => *column_type,
            Self::Data(column) => ColumnType::Native(column.variable.dtype),
            Self::Time { .. } | Self::FixedString { .. } => ColumnType::String,
        }
    }

    /// Value at a flattened row.
    pub fn value(&self, row: usize, index: &RowIndex, source: &dyn ArraySource) -> Result<Value> {
        let out_of_bounds = || NcTableError::RowOutOfBounds {
            row,
            rows: index.len(),
        };
        match self {
            Self::Index { axis, .. } => {
                let i = index.coord(row, *axis).ok_or_else(out_of_bounds)?;
                Ok(Value::Int64(i as i64))
            },
            Self::Coordinate { axis, values, .. } => {
                let i = index.coord(row, *axis).ok_or_else(out_of_bounds)?;
                values.get(i).cloned().ok_or_else(out_of_bounds)
            },
            Self::Data(column) => {
                let coords = index.coords(row).ok_or_else(out_of_bounds)?;
                column.read_one(source, &coords)
            },
            Self::Time { column, units } => {
                let coords = index.coords(row).ok_or_else(out_of_bounds)?;
                let raw = column.read_one(source, &coords)?;
                units.decode(&raw).map(Value::Str)
            },
            Self::FixedString { column, .. } => {
                let coords = index.coords(row).ok_or_else(out_of_bounds)?;
                Ok(Value::Str(decode_text(&column.read(source, &coords)?)))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ElementType, MemorySource};

    fn dims() -> Vec<Dimension> {
        vec![Dimension::new("y", 2), Dimension::new("x", 3)]
    }

    fn source() -> Result<MemorySource> {
        MemorySource::new("columns")
            .with_dimension(Dimension::new("y", 2))
            .with_dimension(Dimension::new("x", 3))
            .with_dimension(Dimension::new("len", 4))
            .with_variable(
                "xy",
                ElementType::Short,
                &["x", "y"],
                (0..6).map(Value::Short).collect(),
            )?
            .with_text("label", &["x", "len"], &["a", "bb", "dddd"])
    }

    #[test]
    fn test_axis_map_follows_table_order() -> Result<()> {
        let src = source()?;
        let var = src.variable("xy")?.unwrap();
        let column = VariableColumn::new(var, &dims())?;
        assert_eq!(column.axes(), &[1, 0]);
        assert_eq!(column.shape(), &[1, 1]);
        assert_eq!(column.origin(&[1, 2]), vec![2, 1]);
        Ok(())
    }

    #[test]
    fn test_data_column_reads_transposed_variable() -> Result<()> {
        let src = source()?;
        let variable = src.variable("xy")?.unwrap();
        let column = Column::for_variable(variable, &dims(), Calendar::Standard)?;
        let index = RowIndex::new(vec![2, 3]);
        // Row 4 is (y=1, x=1), stored at xy[1][1] = 1 * 2 + 1.
        assert_eq!(column.value(4, &index, &src)?, Value::Short(3));
        assert_eq!(column.column_type(), ColumnType::Native(ElementType::Short));
        Ok(())
    }

    #[test]
    fn test_fixed_string_column() -> Result<()> {
        let src = source()?;
        let variable = src.variable("label")?.unwrap();
        let column = Column::for_variable(variable, &dims(), Calendar::Standard)?;
        match &column {
            Column::FixedString { column, length } => {
                assert_eq!(*length, 4);
                assert_eq!(column.shape(), &[1, 4]);
                assert_eq!(column.origin(&[1, 2]), vec![2, 0]);
            },
            other => panic!("expected a string column, got {:?}", other),
        }
        let index = RowIndex::new(vec![2, 3]);
        assert_eq!(column.value(5, &index, &src)?, Value::Str("dddd".into()));
        assert_eq!(column.value(0, &index, &src)?, Value::Str("a".into()));
        assert_eq!(column.column_type(), ColumnType::String);
        Ok(())
    }

    #[test]
    fn test_incompatible_dimensions() {
        let var = VariableInfo::new("z", vec![Dimension::new("z", 2)], ElementType::Float);
        let err = VariableColumn::new(var, &dims()).unwrap_err();
        assert!(matches!(err, NcTableError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_index_column_out_of_bounds() {
        let src = MemorySource::new("empty");
        let column = Column::Index { label: "x".into(), axis: 1 };
        let index = RowIndex::new(vec![2, 3]);
        assert_eq!(column.value(5, &index, &src).unwrap(), Value::Int64(2));
        assert!(matches!(
            column.value(6, &index, &src),
            Err(NcTableError::RowOutOfBounds { row: 6, rows: 6 })
        ));
    }

    #[test]
    fn test_decode_text_stops_at_nul() {
        let chars: Vec<Value> = b"ab\0c".iter().copied().map(Value::Char).collect();
        assert_eq!(decode_text(&chars), "ab");
    }
}
