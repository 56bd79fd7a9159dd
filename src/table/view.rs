//! Flat table view over congruent variables.

use super::column::Column;
use super::coordinate::{is_congruent, CoordinateResolver};
use super::index::RowIndex;
use super::pager::RowCount;
use crate::data::{ArraySource, ColumnType, Dimension, Value};
use crate::error::{NcTableError, Result};
use std::rc::Rc;

/// Represent n-dimensional variables as a two-dimensional table where
/// variables are mapped to columns in flattened row-major order.
///
/// The first variable added fixes the table dimensions and adds one
/// coordinate column per dimension. Every later variable must have the same
/// set of public dimensions, in any order. A failed [`TableView::add_variable`]
/// leaves the view unchanged.
#[derive(Debug)]
pub struct TableView {
    source: Rc<dyn ArraySource>,
    resolver: CoordinateResolver,
    /// Dimensions fixed by the first variable; `None` while empty.
    dimensions: Option<Vec<Dimension>>,
    columns: Vec<Column>,
    index: RowIndex,
}

fn dimension_names(dimensions: &[Dimension]) -> String {
    dimensions
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl TableView {
    /// Create an empty view over a source.
    pub fn new(source: Rc<dyn ArraySource>, resolver: CoordinateResolver) -> Self {
        Self {
            source,
            resolver,
            dimensions: None,
            columns: Vec::new(),
            index: RowIndex::default(),
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &Rc<dyn ArraySource> {
        &self.source
    }

    /// Resolver used for dimension coordinates.
    pub fn resolver(&self) -> &CoordinateResolver {
        &self.resolver
    }

    /// True once a variable has been added.
    pub fn is_bound(&self) -> bool {
        self.dimensions.is_some()
    }

    /// Table dimensions, empty until the first variable is added.
    pub fn dimensions(&self) -> &[Dimension] {
        self.dimensions.as_deref().unwrap_or(&[])
    }

    /// Row index space.
    pub fn row_index(&self) -> &RowIndex {
        &self.index
    }

    /// Add a variable as a new column if it is not already present.
    pub fn add_variable(&mut self, name: &str) -> Result<()> {
        if self.column_by_label(name).is_some() {
            return Ok(());
        }
        let variable = self
            .source
            .variable(name)?
            .ok_or_else(|| NcTableError::unknown_variable(name))?;
        if self.column_by_label(&variable.name).is_some() {
            return Ok(());
        }
        let calendar = self.resolver.default_calendar();

        match &self.dimensions {
            None => {
                tracing::debug!("Binding table to dimensions of {}", variable.name);
                let dimensions = variable.public_dimensions().to_vec();
                let mut columns = Vec::with_capacity(dimensions.len() + 1);
                for (axis, dimension) in dimensions.iter().enumerate() {
                    columns.push(Column::for_dimension(
                        self.source.as_ref(),
                        &self.resolver,
                        dimension,
                        axis,
                    )?);
                }
                // A coordinate variable may be selected directly.
                if !columns.iter().any(|c| c.label() == variable.name) {
                    columns.push(Column::for_variable(variable, &dimensions, calendar)?);
                }
                let index = RowIndex::new(dimensions.iter().map(|d| d.len).collect());
                tracing::debug!(
                    "Table has {} rows over [{}]",
                    index.len(),
                    dimension_names(&dimensions)
                );
                self.columns = columns;
                self.index = index;
                self.dimensions = Some(dimensions);
            },
            Some(dimensions) => {
                if !is_congruent(dimensions, &variable) {
                    return Err(NcTableError::IncongruentVariable {
                        name: variable.name.clone(),
                        expected: dimension_names(dimensions),
                        found: dimension_names(variable.public_dimensions()),
                    });
                }
                let column = Column::for_variable(variable, dimensions, calendar)?;
                tracing::debug!("Adding column {}", column.label());
                self.columns.push(column);
            },
        }
        Ok(())
    }

    /// Add several variables in order, stopping at the first failure.
    pub fn add_variables<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_for_each(|name| self.add_variable(name.as_ref()))
    }

    /// Remove all columns and dimensions.
    pub fn reset(&mut self) {
        self.dimensions = None;
        self.columns.clear();
        self.index = RowIndex::default();
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(Column::label).collect()
    }

    /// Column by position.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Column by label.
    pub fn column_by_label(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label() == label)
    }

    fn checked_column(&self, column: usize) -> Result<&Column> {
        self.columns
            .get(column)
            .ok_or(NcTableError::ColumnOutOfBounds {
                column,
                columns: self.columns.len(),
            })
    }

    /// Label of a column.
    pub fn column_label(&self, column: usize) -> Result<&str> {
        self.checked_column(column).map(Column::label)
    }

    /// Declared type of a column.
    pub fn column_type(&self, column: usize) -> Result<ColumnType> {
        self.checked_column(column).map(Column::column_type)
    }

    /// Value of a single cell.
    pub fn value(&self, row: usize, column: usize) -> Result<Value> {
        if self.source.is_closed() {
            return Err(NcTableError::Closed);
        }
        let col = self.checked_column(column)?;
        if row >= self.index.len() {
            return Err(NcTableError::RowOutOfBounds {
                row,
                rows: self.index.len(),
            });
        }
        col.value(row, &self.index, self.source.as_ref())
    }

    /// Every value of a row.
    pub fn row(&self, row: usize) -> Result<Vec<Value>> {
        (0..self.columns.len())
            .map(|column| self.value(row, column))
            .collect()
    }
}

impl RowCount for TableView {
    fn row_count(&self) -> usize {
        self.index.len()
    }
}
