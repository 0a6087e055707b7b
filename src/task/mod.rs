//! Task extraction core
//!
//! Turns free-form sentences into structured task records:
//! - Sentence parsing with ordered field extractors (assignee, priority,
//!   due date, task name)
//! - Transcript segmentation on sentence-terminal punctuation
//! - Deterministic date resolution against an injected reference instant

pub mod datetime;
pub mod model;
pub mod parser;

pub use datetime::{DateTimeResolver, NaturalDateResolver};
pub use model::{ParsedTask, Priority, Task};
pub use parser::{parse_sentence, parse_transcript, SentenceParser};
