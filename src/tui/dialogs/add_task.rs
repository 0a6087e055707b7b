//! Add task dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;

pub struct AddTaskDialog {
    sentence: Input,
}

impl AddTaskDialog {
    pub fn new() -> Self {
        Self {
            sentence: Input::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<String> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => {
                let value = self.sentence.value().trim().to_string();
                if value.is_empty() {
                    DialogResult::Cancel
                } else {
                    DialogResult::Submit(value)
                }
            }
            _ => {
                self.sentence.handle_event(&crossterm::event::Event::Key(key));
                DialogResult::Continue
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 70, 9);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Add Task ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        render_text_field(
            frame,
            chunks[0],
            "Task:",
            &self.sentence,
            true,
            Some("e.g. Maria, send the report by Friday P1"),
            theme,
        );

        let example = Line::from(vec![Span::styled(
            "Assignee, due date, and P1-P4 priority are picked out automatically.",
            Style::default().fg(theme.dimmed),
        )]);
        frame.render_widget(Paragraph::new(example), chunks[1]);

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" add  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
}

impl Default for AddTaskDialog {
    fn default() -> Self {
        Self::new()
    }
}
