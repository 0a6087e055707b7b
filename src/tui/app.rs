//! Main TUI application

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::time::Duration;

use super::board::BoardView;
use super::styles::Theme;
use crate::config::Config;
use crate::storage::Storage;

pub struct App {
    board: BoardView,
    should_quit: bool,
    theme: Theme,
}

impl App {
    pub fn new(profile: &str) -> Result<Self> {
        let storage = Storage::new(profile)?;
        let config = Config::load()?;
        let board = BoardView::new(storage, config.board)?;
        let theme = Theme::default();

        Ok(Self {
            board,
            should_quit: false,
            theme,
        })
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        // Initial render
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        let mut last_disk_refresh = std::time::Instant::now();
        const DISK_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

        loop {
            // Poll with short timeout for responsive input
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);

                    // Draw immediately after input for responsiveness
                    terminal.draw(|f| self.render(f))?;

                    if self.should_quit {
                        break;
                    }
                    continue;
                }
            }

            // Periodic disk refresh to sync with other instances
            if last_disk_refresh.elapsed() >= DISK_REFRESH_INTERVAL {
                self.board.reload()?;
                last_disk_refresh = std::time::Instant::now();
                terminal.draw(|f| self.render(f))?;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        self.board.render(frame, frame.area(), &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Global keybindings
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
                if !self.board.captures_input() {
                    self.should_quit = true;
                    return;
                }
            }
            _ => {}
        }

        // Delegate to board view
        if let Some(action) = self.board.handle_key(key) {
            match action {
                Action::Quit => self.should_quit = true,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
}
