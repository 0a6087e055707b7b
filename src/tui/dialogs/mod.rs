//! TUI dialog components

mod add_task;
mod confirm;

pub use add_task::AddTaskDialog;
pub use confirm::ConfirmDialog;

use ratatui::prelude::*;

pub enum DialogResult<T> {
    Continue,
    Cancel,
    Submit(T),
}

/// Center a fixed-size rect inside `area`, clamped to its bounds.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
