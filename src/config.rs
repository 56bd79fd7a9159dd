//! Viewer configuration.

use crate::table::Calendar;

/// Settings shared by the table model and the terminal front end.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Calendar for time variables without a usable `calendar` attribute.
    pub default_calendar: Calendar,
    /// Width of each table column in characters.
    pub column_width: u16,
    /// Width of the row number column.
    pub row_header_width: u16,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            default_calendar: Calendar::Standard,
            column_width: 14,
            row_header_width: 8,
        }
    }
}

impl ViewerConfig {
    /// Override the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Override the default calendar.
    pub fn with_default_calendar(mut self, calendar: Calendar) -> Self {
        self.default_calendar = calendar;
        self
    }
}
