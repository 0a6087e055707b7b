//! TUI theme and styling

use ratatui::style::Color;

use crate::task::Priority;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Task colors
    pub done: Color,
    pub overdue: Color,
    pub assignee: Color,

    // Priority colors
    pub p1: Color,
    pub p2: Color,
    pub p3: Color,
    pub p4: Color,

    // UI elements
    pub search: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    pub fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            selection: Color::Rgb(30, 50, 40),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            done: Color::Rgb(60, 100, 70),
            overdue: Color::Rgb(255, 100, 80),
            assignee: Color::Rgb(100, 220, 160),

            p1: Color::Rgb(255, 100, 80),
            p2: Color::Rgb(255, 180, 60),
            p3: Color::Rgb(0, 255, 180),
            p4: Color::Rgb(100, 160, 120),

            search: Color::Rgb(180, 255, 200),
            accent: Color::Rgb(57, 255, 20),
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::P1 => self.p1,
            Priority::P2 => self.p2,
            Priority::P3 => self.p3,
            Priority::P4 => self.p4,
        }
    }
}
