//! TUI components

mod help;
mod text_input;

pub use help::HelpOverlay;
pub use text_input::render_text_field;
