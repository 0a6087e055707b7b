//! Shared text input rendering component

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;

use crate::tui::styles::Theme;

/// Renders a labelled text input with a block cursor.
///
/// An empty field shows its placeholder dimmed, with the cursor in front
/// when focused so a single-field dialog still reads as editable.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    is_focused: bool,
    placeholder: Option<&str>,
    theme: &Theme,
) {
    let label_style = if is_focused {
        Style::default().fg(theme.accent).underlined()
    } else {
        Style::default().fg(theme.text)
    };
    let value_style = if is_focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let value = input.value();

    let mut spans = vec![Span::styled(label, label_style), Span::raw(" ")];

    if is_focused {
        let cursor_style = Style::default().fg(theme.background).bg(theme.accent);
        let (before, cursor_char, after) = split_at_cursor(value, input.visual_cursor());

        if !before.is_empty() {
            spans.push(Span::styled(before, value_style));
        }
        spans.push(Span::styled(cursor_char, cursor_style));
        if !after.is_empty() {
            spans.push(Span::styled(after, value_style));
        }
        if value.is_empty() {
            if let Some(placeholder_text) = placeholder {
                spans.push(Span::styled(
                    placeholder_text,
                    Style::default().fg(theme.dimmed),
                ));
            }
        }
    } else if value.is_empty() {
        if let Some(placeholder_text) = placeholder {
            spans.push(Span::styled(
                placeholder_text,
                Style::default().fg(theme.dimmed),
            ));
        }
    } else {
        spans.push(Span::styled(value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Splits `value` into text before the cursor, the character under the
/// cursor, and text after it. A cursor past the end covers a space.
fn split_at_cursor(value: &str, cursor_pos: usize) -> (String, String, String) {
    let before: String = value.chars().take(cursor_pos).collect();
    let cursor_char: String = value
        .chars()
        .nth(cursor_pos)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = value.chars().skip(cursor_pos + 1).collect();
    (before, cursor_char, after)
}
