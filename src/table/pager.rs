//! Paging over large tables.
//!
//! Only the rows of the current page are addressable through a
//! [`PagedTable`]; page numbers start at 1 and are clamped to the valid
//! range.

use super::coordinate::CoordinateResolver;
use super::view::TableView;
use crate::config::ViewerConfig;
use crate::data::{ArraySource, ColumnType, Value};
use crate::error::{NcTableError, Result};
use std::rc::Rc;

/// Anything with a known number of rows.
pub trait RowCount {
    /// Total number of rows.
    fn row_count(&self) -> usize;
}

/// Fixed-size windows over a row-counted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    total_rows: usize,
    page_count: usize,
    page_number: usize,
}

impl Pager {
    /// Create a pager with no rows. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_rows: 0,
            page_count: 0,
            page_number: 0,
        }
    }

    /// Create a pager over a source, positioned on the first page.
    pub fn for_source(source: &impl RowCount, page_size: usize) -> Self {
        let mut pager = Self::new(page_size);
        pager.set_total_rows(source.row_count());
        pager
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size, keeping the page number in range.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.update_page_count();
    }

    /// Total rows in the source.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Change the number of source rows, keeping the page number in range.
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.update_page_count();
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Current page, starting at 1; 0 if there are no pages.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Go to a page, clamped to `1..=page_count`.
    pub fn set_page_number(&mut self, page_number: usize) {
        self.page_number = if self.page_count == 0 {
            0
        } else {
            page_number.clamp(1, self.page_count)
        };
    }

    /// Move by a number of pages in either direction.
    pub fn advance(&mut self, delta: isize) {
        let target = if delta.is_negative() {
            self.page_number.saturating_sub(delta.unsigned_abs())
        } else {
            self.page_number.saturating_add(delta.unsigned_abs())
        };
        self.set_page_number(target);
    }

    /// Go to the next page.
    pub fn next(&mut self) {
        self.advance(1);
    }

    /// Go to the previous page.
    pub fn previous(&mut self) {
        self.advance(-1);
    }

    /// Go to the first page.
    pub fn first(&mut self) {
        self.set_page_number(1);
    }

    /// Go to the last page.
    pub fn last(&mut self) {
        self.set_page_number(self.page_count);
    }

    /// Number of rows on the current page.
    pub fn rows_on_current_page(&self) -> usize {
        if self.page_count == 0 {
            0
        } else if self.page_number == self.page_count {
            self.total_rows - (self.page_count - 1) * self.page_size
        } else {
            self.page_size
        }
    }

    /// Source row for a row of the current page.
    pub fn global_row(&self, page_row: usize) -> Option<usize> {
        if page_row >= self.rows_on_current_page() {
            return None;
        }
        Some((self.page_number - 1) * self.page_size + page_row)
    }

    fn update_page_count(&mut self) {
        self.page_count = self.total_rows.div_ceil(self.page_size);
        self.set_page_number(self.page_number);
    }
}

/// A table view presented one page at a time.
#[derive(Debug)]
pub struct PagedTable {
    view: TableView,
    pager: Pager,
}

impl PagedTable {
    /// Create an empty paged table.
    pub fn new(source: Rc<dyn ArraySource>, config: &ViewerConfig) -> Self {
        let resolver = CoordinateResolver::new(config.default_calendar);
        Self {
            view: TableView::new(source, resolver),
            pager: Pager::new(config.page_size),
        }
    }

    /// Replace the table contents with the given variables and go to the
    /// first page. On failure the previous contents are kept.
    pub fn fill<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source = Rc::clone(self.view.source());
        tracing::debug!("Loading data from {}", source.location());
        let mut view = TableView::new(source, *self.view.resolver());
        view.add_variables(names)?;
        self.view = view;
        self.pager = Pager::for_source(&self.view, self.pager.page_size());
        Ok(())
    }

    /// Remove all columns.
    pub fn clear(&mut self) {
        self.view.reset();
        self.pager.set_total_rows(0);
    }

    /// The whole table.
    pub fn view(&self) -> &TableView {
        &self.view
    }

    /// Page state.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Mutable page state for navigation.
    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    /// Rows on the current page.
    pub fn row_count(&self) -> usize {
        self.pager.rows_on_current_page()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.view.column_count()
    }

    /// Label of a column.
    pub fn column_label(&self, column: usize) -> Result<&str> {
        self.view.column_label(column)
    }

    /// Declared type of a column.
    pub fn column_type(&self, column: usize) -> Result<ColumnType> {
        self.view.column_type(column)
    }

    /// Value of a cell on the current page.
    pub fn value(&self, page_row: usize, column: usize) -> Result<Value> {
        let row = self
            .pager
            .global_row(page_row)
            .ok_or(NcTableError::RowOutOfBounds {
                row: page_row,
                rows: self.row_count(),
            })?;
        self.view.value(row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dimension, ElementType, MemorySource};

    struct Rows(usize);

    impl RowCount for Rows {
        fn row_count(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn test_page_count() {
        let pager = Pager::for_source(&Rows(32768), 10);
        assert_eq!(pager.page_count(), 3277);
        assert_eq!(pager.page_number(), 1);
        assert_eq!(pager.rows_on_current_page(), 10);
    }

    #[test]
    fn test_last_page() {
        let mut pager = Pager::for_source(&Rows(32768), 10);
        pager.last();
        assert_eq!(pager.page_number(), 3277);
        assert_eq!(pager.rows_on_current_page(), 8);
        assert_eq!(pager.global_row(7), Some(32767));
        assert_eq!(pager.global_row(8), None);
    }

    #[test]
    fn test_page_number_is_clamped() {
        let mut pager = Pager::for_source(&Rows(32768), 10);
        pager.set_page_number(0);
        assert_eq!(pager.page_number(), 1);
        pager.set_page_number(5000);
        assert_eq!(pager.page_number(), 3277);
        pager.advance(-10_000);
        assert_eq!(pager.page_number(), 1);
        pager.next();
        assert_eq!(pager.global_row(3), Some(13));
    }

    #[test]
    fn test_no_rows() {
        let mut pager = Pager::new(10);
        pager.set_page_number(3);
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.page_number(), 0);
        assert_eq!(pager.rows_on_current_page(), 0);
        assert_eq!(pager.global_row(0), None);
    }

    #[test]
    fn test_page_size_change_reclamps() {
        let mut pager = Pager::for_source(&Rows(100), 10);
        pager.last();
        pager.set_page_size(30);
        assert_eq!(pager.page_count(), 4);
        assert_eq!(pager.page_number(), 4);
        assert_eq!(pager.rows_on_current_page(), 10);
        pager.set_page_size(0);
        assert_eq!(pager.page_size(), 1);
        assert_eq!(pager.page_count(), 100);
    }

    fn grid() -> Result<Rc<dyn ArraySource>> {
        let source = MemorySource::new("grid")
            .with_dimension(Dimension::new("y", 5))
            .with_dimension(Dimension::new("x", 5))
            .with_variable("v", ElementType::Int, &["y", "x"], (0..25).map(Value::Int).collect())?
            .with_variable("w", ElementType::Int, &["x"], (0..5).map(Value::Int).collect())?;
        Ok(Rc::new(source))
    }

    #[test]
    fn test_paged_table() -> Result<()> {
        let config = ViewerConfig {
            page_size: 10,
            ..ViewerConfig::default()
        };
        let mut table = PagedTable::new(grid()?, &config);
        assert_eq!(table.row_count(), 0);
        table.fill(["v"])?;
        assert_eq!(table.pager().page_count(), 3);
        assert_eq!(table.row_count(), 10);
        table.pager_mut().set_page_number(2);
        assert_eq!(table.value(1, 2)?, Value::Int(11));
        table.pager_mut().last();
        assert_eq!(table.row_count(), 5);
        assert!(table.value(5, 0).is_err());

        table.fill(["w"])?;
        assert_eq!(table.pager().page_size(), 10);
        assert_eq!(table.pager().page_count(), 1);
        assert_eq!(table.pager().page_number(), 1);
        assert_eq!(table.row_count(), 5);
        Ok(())
    }

    #[test]
    fn test_failed_fill_keeps_contents() -> Result<()> {
        let mut table = PagedTable::new(grid()?, &ViewerConfig::default());
        table.fill(["v"])?;
        assert!(table.fill(["v", "w"]).is_err());
        assert_eq!(table.column_count(), 3);
        table.clear();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.pager().page_number(), 0);
        Ok(())
    }
}
