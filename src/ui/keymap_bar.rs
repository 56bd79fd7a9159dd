//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(crate) fn draw_keymap(f: &mut Frame<'_>, area: Rect, has_error: bool, colors: &ThemeColors) {
    let keymap_text = if has_error {
        "q:quit | T:theme"
    } else {
        concat!(
            "q:quit | n/→:next | p/←:prev | ]/[:±10 pages | g/G:first/last",
            " | jk:row | hl:cols | T:theme"
        )
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.gray).bg(colors.bg0));

    f.render_widget(paragraph, area);
}
