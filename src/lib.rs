//! Taskflow library - Natural language task extraction and tracking
//!
//! The `task` module turns free-form sentences and transcripts into
//! structured tasks; `storage` persists them per profile; `cli` and `tui`
//! are the two front ends.

pub mod cli;
pub mod config;
pub mod storage;
pub mod task;
pub mod tui;
