//! User interface rendering.

mod formatters;
mod keymap_bar;
mod status_bar;
mod table;
mod theme;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub use formatters::{fit_width, format_float, format_number, format_value};
pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);
    f.render_widget(
        Block::default().style(Style::default().bg(colors.bg0)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status
            Constraint::Length(1), // Keymap
        ])
        .split(f.area());

    draw_header(f, chunks[0], app, &colors);
    match app.error_message.clone() {
        Some(error) => draw_error(f, chunks[1], &error, &colors),
        None => table::draw_table(f, chunks[1], app, &colors),
    }
    status_bar::draw_status(f, chunks[2], &app.status, &colors);
    keymap_bar::draw_keymap(f, chunks[3], app.error_message.is_some(), &colors);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let view = app.table.view();
    let dims: Vec<String> = view
        .dimensions()
        .iter()
        .map(|d| format!("{}:{}", d.name, d.len))
        .collect();
    let lines = vec![
        Line::from(vec![
            Span::styled(
                view.source().location(),
                Style::default()
                    .fg(colors.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", app.selection.join(", ")),
                Style::default().fg(colors.fg0),
            ),
        ]),
        Line::from(vec![
            Span::styled("Dimensions: ", Style::default().fg(colors.green)),
            Span::styled(format!("[{}]", dims.join(", ")), Style::default().fg(colors.fg0)),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_error(f: &mut Frame<'_>, area: Rect, error: &str, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "Cannot Build Table",
            Style::default().fg(colors.red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(colors.fg0))),
        Line::from(""),
        Line::from("Press q to quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2)),
        )
        .style(Style::default().fg(colors.fg0))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
