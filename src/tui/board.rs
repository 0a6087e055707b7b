//! Task board view

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::components::HelpOverlay;
use super::dialogs::{AddTaskDialog, ConfirmDialog, DialogResult};
use super::styles::Theme;
use crate::config::BoardConfig;
use crate::storage::Storage;
use crate::task::{parse_sentence, Task};

enum PendingAction {
    Delete(String),
    ClearCompleted,
}

pub struct BoardView {
    storage: Storage,
    board_config: BoardConfig,
    tasks: Vec<Task>,
    cursor: usize,
    add_dialog: Option<AddTaskDialog>,
    confirm_dialog: Option<ConfirmDialog>,
    pending_action: Option<PendingAction>,
    show_help: bool,
    search_active: bool,
    search_query: String,
}

impl BoardView {
    pub fn new(storage: Storage, board_config: BoardConfig) -> Result<Self> {
        let tasks = storage.load()?;

        Ok(Self {
            storage,
            board_config,
            tasks,
            cursor: 0,
            add_dialog: None,
            confirm_dialog: None,
            pending_action: None,
            show_help: false,
            search_active: false,
            search_query: String::new(),
        })
    }

    pub fn reload(&mut self) -> Result<()> {
        self.tasks = self.storage.load()?;
        self.clamp_cursor();
        Ok(())
    }

    pub fn has_dialog(&self) -> bool {
        self.add_dialog.is_some() || self.confirm_dialog.is_some() || self.show_help
    }

    /// True while a dialog or the search prompt is consuming keystrokes,
    /// so global shortcuts like 'q' must not fire.
    pub fn captures_input(&self) -> bool {
        self.has_dialog() || self.search_active
    }

    /// Indices into `self.tasks` in display order, after the completed-task
    /// setting and any active filter are applied.
    fn visible_indices(&self) -> Vec<usize> {
        let query = self.search_query.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| self.board_config.show_completed || !task.completed)
            .filter(|(_, task)| {
                if query.is_empty() {
                    return true;
                }
                task.task_name.to_lowercase().contains(&query)
                    || task
                        .assignee
                        .as_deref()
                        .is_some_and(|a| a.to_lowercase().contains(&query))
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    fn selected_task(&self) -> Option<&Task> {
        let visible = self.visible_indices();
        visible.get(self.cursor).map(|&idx| &self.tasks[idx])
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_indices().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        let items = self.visible_indices().len();
        if items == 0 {
            return;
        }

        self.cursor = if delta < 0 {
            self.cursor.saturating_sub((-delta) as usize)
        } else {
            (self.cursor + delta as usize).min(items - 1)
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.add_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.add_dialog = None;
                }
                DialogResult::Submit(sentence) => {
                    self.add_dialog = None;
                    if let Err(e) = self.add_task(&sentence) {
                        tracing::error!("Failed to add task: {}", e);
                    }
                }
            }
            return None;
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.confirm_dialog = None;
                    self.pending_action = None;
                }
                DialogResult::Submit(()) => {
                    self.confirm_dialog = None;
                    let result = match self.pending_action.take() {
                        Some(PendingAction::Delete(id)) => self.delete_task(&id),
                        Some(PendingAction::ClearCompleted) => self.clear_completed(),
                        None => Ok(()),
                    };
                    if let Err(e) = result {
                        tracing::error!("Board action failed: {}", e);
                    }
                }
            }
            return None;
        }

        // Search mode
        if self.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.search_query.clear();
                    self.clamp_cursor();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                }
                KeyCode::Backspace => {
                    self.search_query.pop();
                    self.clamp_cursor();
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    self.cursor = 0;
                }
                _ => {}
            }
            return None;
        }

        // Normal mode keybindings
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.search_query.clear();
                self.cursor = 0;
            }
            KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.clamp_cursor();
                }
            }
            KeyCode::Char('a') => {
                self.add_dialog = Some(AddTaskDialog::new());
            }
            KeyCode::Char(' ') | KeyCode::Char('d') => {
                if let Err(e) = self.toggle_selected() {
                    tracing::error!("Failed to toggle task: {}", e);
                }
            }
            KeyCode::Char('x') => {
                if let Some((id, name)) = self
                    .selected_task()
                    .map(|t| (t.id.clone(), t.task_name.clone()))
                {
                    let message = format!("Delete '{}'?", name);
                    self.pending_action = Some(PendingAction::Delete(id));
                    self.confirm_dialog = Some(ConfirmDialog::new("Delete Task", &message));
                }
            }
            KeyCode::Char('c') => {
                let completed = self.tasks.iter().filter(|t| t.completed).count();
                if completed > 0 {
                    let message = format!("Remove {} completed task(s)?", completed);
                    self.pending_action = Some(PendingAction::ClearCompleted);
                    self.confirm_dialog = Some(ConfirmDialog::new("Clear Completed", &message));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1);
            }
            KeyCode::PageUp => {
                self.move_cursor(-10);
            }
            KeyCode::PageDown => {
                self.move_cursor(10);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                let len = self.visible_indices().len();
                if len > 0 {
                    self.cursor = len - 1;
                }
            }
            _ => {}
        }

        None
    }

    fn add_task(&mut self, sentence: &str) -> Result<()> {
        let parsed = parse_sentence(sentence, Utc::now());
        let task = Task::from_parsed(parsed);
        self.storage.add(task)?;
        self.reload()?;
        self.cursor = 0;
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            self.storage.toggle(&id)?;
            self.reload()?;
        }
        Ok(())
    }

    fn delete_task(&mut self, id: &str) -> Result<()> {
        self.storage.remove(id)?;
        self.reload()?;
        Ok(())
    }

    fn clear_completed(&mut self) -> Result<()> {
        let removed = self.storage.clear_completed()?;
        tracing::debug!("Cleared {} completed task(s)", removed);
        self.reload()?;
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Layout: main area + status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        // Layout: left panel (list) and right panel (detail)
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        self.render_list(frame, chunks[0], theme);
        self.render_detail(frame, chunks[1], theme);
        self.render_status_bar(frame, main_chunks[1], theme);

        // Render dialogs on top
        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }

        if let Some(dialog) = &self.add_dialog {
            dialog.render(frame, area, theme);
        }

        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Taskflow [{}] ", self.storage.profile()))
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.tasks.is_empty() {
            let empty_text = vec![
                Line::from(""),
                Line::from("No tasks yet").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Press 'a' to add one").style(Style::default().fg(theme.hint)),
                Line::from("or 'taskflow add ...'").style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let visible = self.visible_indices();

        if visible.is_empty() {
            let para = Paragraph::new("No tasks match the filter")
                .style(Style::default().fg(theme.dimmed))
                .alignment(Alignment::Center);
            frame.render_widget(para, inner);
        } else {
            let now = Utc::now();
            let list_items: Vec<ListItem> = visible
                .iter()
                .enumerate()
                .map(|(row, &idx)| {
                    let is_selected = row == self.cursor;
                    self.render_task_row(&self.tasks[idx], is_selected, now, theme)
                })
                .collect();

            let list = List::new(list_items);
            frame.render_widget(list, inner);
        }

        // Render search bar if active
        if self.search_active {
            let search_area = Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            };
            let search_text = format!("/{}", self.search_query);
            let search_para = Paragraph::new(search_text).style(Style::default().fg(theme.search));
            frame.render_widget(search_para, search_area);
        }
    }

    fn render_task_row(
        &self,
        task: &Task,
        is_selected: bool,
        now: chrono::DateTime<Utc>,
        theme: &Theme,
    ) -> ListItem<'_> {
        let (icon, icon_color) = if task.completed {
            ("✓", theme.done)
        } else {
            ("○", theme.priority_color(task.priority))
        };

        let name_style = if task.completed {
            Style::default().fg(theme.done).crossed_out()
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans = vec![
            Span::styled(format!("{} ", icon), Style::default().fg(icon_color)),
            Span::styled(
                format!("{} ", task.priority),
                Style::default().fg(theme.priority_color(task.priority)),
            ),
            Span::styled(
                task.task_name.clone(),
                if is_selected {
                    name_style.bold()
                } else {
                    name_style
                },
            ),
        ];

        if let Some(assignee) = &task.assignee {
            spans.push(Span::styled(
                format!("  @{}", assignee),
                Style::default().fg(theme.assignee),
            ));
        }

        if let Some(due) = task.due_date {
            let due_color = if task.is_overdue(now) {
                theme.overdue
            } else {
                theme.hint
            };
            spans.push(Span::styled(
                format!("  {}", due.format(&self.board_config.date_format)),
                Style::default().fg(due_color),
            ));
        }

        let line = Line::from(spans);
        if is_selected {
            ListItem::new(line).style(Style::default().bg(theme.selection))
        } else {
            ListItem::new(line)
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Details ")
            .title_style(Style::default().fg(theme.title));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(task) = self.selected_task() else {
            let hint = Paragraph::new("Select a task to see details")
                .style(Style::default().fg(theme.dimmed))
                .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        };

        let label_style = Style::default().fg(theme.dimmed);
        let value_style = Style::default().fg(theme.text);

        let due = match task.due_date {
            Some(due) => {
                let formatted = due.format(&self.board_config.date_format).to_string();
                if task.is_overdue(Utc::now()) {
                    format!("{} (overdue)", formatted)
                } else {
                    formatted
                }
            }
            None => "none".to_string(),
        };

        let status = if task.completed { "done" } else { "pending" };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Task:     ", label_style),
                Span::styled(task.task_name.clone(), value_style),
            ]),
            Line::from(vec![
                Span::styled("Assignee: ", label_style),
                Span::styled(
                    task.assignee.clone().unwrap_or_else(|| "none".to_string()),
                    Style::default().fg(theme.assignee),
                ),
            ]),
            Line::from(vec![
                Span::styled("Due:      ", label_style),
                Span::styled(due, value_style),
            ]),
            Line::from(vec![
                Span::styled("Priority: ", label_style),
                Span::styled(
                    format!("{} ({})", task.priority, task.priority.label()),
                    Style::default().fg(theme.priority_color(task.priority)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Status:   ", label_style),
                Span::styled(status, value_style),
            ]),
            Line::from(vec![
                Span::styled("Created:  ", label_style),
                Span::styled(
                    task.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    value_style,
                ),
            ]),
            Line::from(vec![
                Span::styled("ID:       ", label_style),
                Span::styled(task.id.chars().take(8).collect::<String>(), value_style),
            ]),
            Line::from(""),
            Line::from(Span::styled("Original:", label_style)),
            Line::from(Span::styled(
                task.original_input.clone(),
                Style::default().fg(theme.hint),
            )),
        ];

        if lines.len() > inner.height as usize {
            lines.truncate(inner.height as usize);
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let spans = vec![
            Span::styled(" j/k", key_style),
            Span::styled(" Navigate ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" a", key_style),
            Span::styled(" Add ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" Space", key_style),
            Span::styled(" Done ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" x", key_style),
            Span::styled(" Delete ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" /", key_style),
            Span::styled(" Filter ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ?", key_style),
            Span::styled(" Help ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" q", key_style),
            Span::styled(" Quit", desc_style),
        ];

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}
