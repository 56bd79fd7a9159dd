//! Page view: the rows of the current page as a table.

use crate::app::App;
use crate::data::ColumnType;
use crate::ui::{fit_width, format_number, ThemeColors};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table},
    Frame,
};

fn is_right_aligned(column_type: ColumnType) -> bool {
    match column_type {
        ColumnType::Index => true,
        ColumnType::Native(dtype) => dtype.is_numeric(),
        ColumnType::String => false,
    }
}

/// Draw the current page.
pub(crate) fn draw_table(f: &mut Frame<'_>, area: Rect, app: &mut App, colors: &ThemeColors) {
    // Borders plus a two line header.
    let visible_rows = (area.height as usize).saturating_sub(4);
    app.scroll_to_cursor(visible_rows);

    let col_width = app.config.column_width.max(3) as usize;
    let row_header_width = app.config.row_header_width as usize;
    let visible_cols =
        ((area.width as usize).saturating_sub(row_header_width + 2) / (col_width + 1)).max(1);

    let total_cols = app.table.column_count();
    let start_col = app.column_offset.min(total_cols.saturating_sub(1));
    let end_col = (start_col + visible_cols).min(total_cols);
    let page_rows = app.table.row_count();
    let start_row = app.scroll;
    let end_row = (start_row + visible_rows).min(page_rows);

    let column_types: Vec<Option<ColumnType>> = (start_col..end_col)
        .map(|col| app.table.column_type(col).ok())
        .collect();

    let mut rows = Vec::with_capacity(end_row.saturating_sub(start_row));
    for page_row in start_row..end_row {
        let row_label = app
            .table
            .pager()
            .global_row(page_row)
            .map(|r| r.to_string())
            .unwrap_or_default();
        let mut cells = vec![Cell::from(fit_width(&row_label, row_header_width, true))
            .style(Style::default().fg(colors.green))];

        for (col, column_type) in (start_col..end_col).zip(&column_types) {
            let right = column_type.map_or(false, is_right_aligned);
            let cell = match app.cell_text(page_row, col) {
                Ok(text) => Cell::from(fit_width(&text, col_width, right))
                    .style(Style::default().fg(colors.aqua)),
                Err(e) => {
                    tracing::warn!("Failed to read row {} column {}: {}", page_row, col, e);
                    Cell::from(fit_width("ERR", col_width, right))
                        .style(Style::default().fg(colors.red))
                },
            };
            cells.push(cell);
        }

        let mut row = Row::new(cells);
        if page_row == app.cursor {
            row = row.style(Style::default().fg(colors.bg0).bg(colors.yellow));
        }
        rows.push(row);
    }

    let mut header_cells = vec![Cell::from("")];
    for (col, column_type) in (start_col..end_col).zip(&column_types) {
        let label = app.table.column_label(col).unwrap_or_default();
        let type_name = column_type.map(|t| t.to_string()).unwrap_or_default();
        let right = column_type.map_or(false, is_right_aligned);
        header_cells.push(Cell::from(Text::from(vec![
            Line::styled(
                fit_width(label, col_width, right),
                Style::default().fg(colors.green).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                fit_width(&type_name, col_width, right),
                Style::default().fg(colors.orange),
            ),
        ])));
    }

    let mut widths = vec![Constraint::Length(row_header_width as u16)];
    for _ in start_col..end_col {
        widths.push(Constraint::Length(col_width as u16));
    }

    let pager = app.table.pager();
    let title = format!(
        " Page {} of {} | Rows {} | Cols {}-{} of {} ",
        format_number(pager.page_number()),
        format_number(pager.page_count()),
        format_number(pager.total_rows()),
        if total_cols == 0 { 0 } else { start_col + 1 },
        end_col,
        total_cols
    );

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).height(2))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2))
                .title(title)
                .title_style(Style::default().fg(colors.yellow)),
        )
        .style(Style::default().fg(colors.fg0).bg(colors.bg0));

    f.render_widget(table, area);

    if page_rows > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(page_rows.saturating_sub(visible_rows)).position(start_row);
        f.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            area,
            &mut scrollbar_state,
        );
    }
}
