//! Application state and logic.

use std::rc::Rc;

use crate::config::ViewerConfig;
use crate::data::{ArraySource, VariableInfo};
use crate::error::Result;
use crate::table::PagedTable;
use crate::ui::{format_number, format_value};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Pick the variables to show when none were requested: the first variable
/// that is not a dimension's coordinate variable, or failing that the first
/// variable.
pub fn default_selection(variables: &[VariableInfo]) -> Option<String> {
    variables
        .iter()
        .find(|v| !v.public_dimensions().iter().any(|d| d.name == v.name))
        .or_else(|| variables.first())
        .map(|v| v.name.clone())
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Paged table of the selected variables.
    pub table: PagedTable,
    /// Selected variable names.
    pub selection: Vec<String>,
    /// Row cursor within the current page.
    pub cursor: usize,
    /// First visible row of the current page.
    pub scroll: usize,
    /// First visible column after the fixed row number column.
    pub column_offset: usize,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Error message.
    pub error_message: Option<String>,
    /// Layout and paging settings.
    pub config: ViewerConfig,
}

impl App {
    /// Create a new application instance showing `selection`.
    ///
    /// A selection the table rejects is reported through
    /// [`App::error_message`] rather than failing.
    pub fn new(source: Rc<dyn ArraySource>, config: ViewerConfig, selection: Vec<String>) -> Self {
        let location = source.location();
        let mut app = Self {
            table: PagedTable::new(source, &config),
            selection,
            cursor: 0,
            scroll: 0,
            column_offset: 0,
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            error_message: None,
            config,
        };

        match app.table.fill(&app.selection) {
            Ok(()) => {
                tracing::info!(
                    "Showing [{}] from {}",
                    app.selection.join(", "),
                    location
                );
                app.status = app.page_status();
            },
            Err(e) => {
                tracing::error!("Failed to build table: {}", e);
                app.error_message = Some(e.to_string());
                app.status = if e.is_selection_error() {
                    "Invalid selection".to_string()
                } else {
                    "Error reading file".to_string()
                };
            },
        }

        app
    }

    /// Go to a page, clamped to the valid range.
    pub fn goto_page(&mut self, page_number: usize) {
        self.table.pager_mut().set_page_number(page_number);
        self.page_changed();
    }

    /// Move by a number of pages in either direction.
    pub fn advance_pages(&mut self, delta: isize) {
        self.table.pager_mut().advance(delta);
        self.page_changed();
    }

    /// Go to the next page.
    pub fn next_page(&mut self) {
        self.advance_pages(1);
    }

    /// Go to the previous page.
    pub fn previous_page(&mut self) {
        self.advance_pages(-1);
    }

    /// Go to the first page.
    pub fn first_page(&mut self) {
        self.table.pager_mut().first();
        self.page_changed();
    }

    /// Go to the last page.
    pub fn last_page(&mut self) {
        self.table.pager_mut().last();
        self.page_changed();
    }

    fn page_changed(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
        tracing::debug!(
            "Page {}/{}",
            self.table.pager().page_number(),
            self.table.pager().page_count()
        );
        self.status = self.page_status();
    }

    /// Move the row cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the row cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.table.row_count() {
            self.cursor += 1;
        }
    }

    /// Keep the cursor inside a window of `visible_rows` rows.
    pub fn scroll_to_cursor(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + visible_rows {
            self.scroll = self.cursor + 1 - visible_rows;
        }
    }

    /// Scroll columns left.
    pub fn scroll_left(&mut self) {
        self.column_offset = self.column_offset.saturating_sub(1);
    }

    /// Scroll columns right.
    pub fn scroll_right(&mut self) {
        if self.column_offset + 1 < self.table.column_count() {
            self.column_offset += 1;
        }
    }

    /// Cycle the color theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Source row under the cursor.
    pub fn cursor_row(&self) -> Option<usize> {
        self.table.pager().global_row(self.cursor)
    }

    /// Page position for the status bar.
    pub fn page_status(&self) -> String {
        let pager = self.table.pager();
        format!(
            "Page {}/{} | {} rows",
            format_number(pager.page_number()),
            format_number(pager.page_count()),
            format_number(pager.total_rows())
        )
    }

    /// Render a cell of the current page.
    pub fn cell_text(&self, page_row: usize, column: usize) -> Result<String> {
        self.table
            .value(page_row, column)
            .map(|value| format_value(&value))
    }

    /// Release the data source.
    pub fn close(&mut self) {
        let source = self.table.view().source();
        tracing::info!("Closing {}", source.location());
        source.close();
    }
}
