//! Natural-language sentence and transcript parsing

use chrono::{DateTime, Utc};
use regex::Regex;

use super::datetime::{DateTimeResolver, NaturalDateResolver, MONTHS, WEEKDAYS};
use super::model::{ParsedTask, Priority};

/// Parse one sentence into a structured task record
pub fn parse_sentence(sentence: &str, reference: DateTime<Utc>) -> ParsedTask {
    SentenceParser::new().parse(sentence, reference)
}

/// Parse a multi-sentence transcript into ordered task records
pub fn parse_transcript(text: &str, reference: DateTime<Utc>) -> Vec<ParsedTask> {
    SentenceParser::new().parse_all(text, reference)
}

/// Extracts task fields from a sentence by running four heuristics in a
/// fixed order, each consuming the residue of the previous: leading
/// "name," assignee, whole-word P1-P4 priority, due-date resolution, and
/// date-phrase stripping for the task name.
///
/// Every stage fails soft. A sentence with none of the fields still parses:
/// no assignee, P3, no due date, the sentence itself as the name.
pub struct SentenceParser {
    resolver: Box<dyn DateTimeResolver>,
    assignee_re: Regex,
    priority_re: Regex,
    strip_res: Vec<Regex>,
    whitespace_re: Regex,
    leading_conj_re: Regex,
    trailing_conj_re: Regex,
    segment_re: Regex,
}

impl SentenceParser {
    pub fn new() -> Self {
        Self::with_resolver(NaturalDateResolver::new())
    }

    /// Use a custom date resolver instead of the built-in one
    pub fn with_resolver(resolver: impl DateTimeResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            assignee_re: Regex::new(r"^(\w+),").unwrap(),
            priority_re: Regex::new(r"(?i)\bP[1-4]\b").unwrap(),
            strip_res: strip_patterns(),
            whitespace_re: Regex::new(r"\s+").unwrap(),
            leading_conj_re: Regex::new(r"(?i)^\s*(?:and\b|&)\s*").unwrap(),
            trailing_conj_re: Regex::new(r"(?i)\s*(?:\band\b|&)\s*$").unwrap(),
            segment_re: Regex::new(r"[.!?]+").unwrap(),
        }
    }

    /// Parse a single trimmed sentence. Never fails; missing fields fall
    /// back to their defaults and an over-stripped name falls back to the
    /// original sentence.
    pub fn parse(&self, sentence: &str, reference: DateTime<Utc>) -> ParsedTask {
        let clean_input = sentence.trim();

        let (assignee, residue) = self.extract_assignee(clean_input);
        let (priority, residue) = self.extract_priority(&residue);

        // The resolver sees the same residue the name stripper does. The
        // two keep independent notions of "looks like a date": stripping
        // runs even when no date resolves, and a resolved date may leave
        // text the stripper keeps.
        let due_date = self.resolver.resolve(&residue, reference);
        let task_name = self.extract_task_name(&residue);

        ParsedTask {
            task_name: if task_name.is_empty() {
                clean_input.to_string()
            } else {
                task_name
            },
            assignee,
            due_date,
            priority,
        }
    }

    /// Split a transcript on sentence-terminal punctuation and parse each
    /// non-empty segment independently, preserving order
    pub fn parse_all(&self, text: &str, reference: DateTime<Utc>) -> Vec<ParsedTask> {
        self.segments(text)
            .into_iter()
            .map(|segment| self.parse(segment, reference))
            .collect()
    }

    /// Transcript segments: split on runs of sentence punctuation,
    /// trimmed, empties dropped. Parsing `segments(text)[i]` yields
    /// `parse_all(text)[i]`.
    pub fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.segment_re
            .split(text)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Leading "<word>," is the assignee; only the leading position counts
    fn extract_assignee(&self, input: &str) -> (Option<String>, String) {
        match self.assignee_re.captures(input) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                let name = caps[1].to_string();
                (Some(name), input[end..].trim().to_string())
            }
            None => (None, input.to_string()),
        }
    }

    /// First whole-word P1-P4 token, any case, anywhere in the residue
    fn extract_priority(&self, input: &str) -> (Priority, String) {
        match self.priority_re.find(input) {
            Some(m) => {
                let priority = Priority::parse(m.as_str()).unwrap_or_default();
                let mut residue = String::with_capacity(input.len());
                residue.push_str(&input[..m.start()]);
                residue.push_str(&input[m.end()..]);
                (priority, residue.trim().to_string())
            }
            None => (Priority::default(), input.to_string()),
        }
    }

    /// Strip date phrases (each pattern applied once, in order), then
    /// normalize whitespace and trim stranded conjunctions
    fn extract_task_name(&self, input: &str) -> String {
        let mut cleaned = input.to_string();
        for re in &self.strip_res {
            let range = re.find(&cleaned).map(|m| m.range());
            if let Some(range) = range {
                cleaned.replace_range(range, "");
                cleaned = cleaned.trim().to_string();
            }
        }

        let collapsed = self.whitespace_re.replace_all(&cleaned, " ");
        let collapsed = self.leading_conj_re.replace(&collapsed, "");
        let collapsed = self.trailing_conj_re.replace(&collapsed, "");
        collapsed.trim().to_string()
    }
}

impl Default for SentenceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Date-phrase patterns removed from the residue when deriving the task
/// name. Order matters: each is applied once, first match only, and later
/// patterns see the text left by earlier ones.
fn strip_patterns() -> Vec<Regex> {
    [
        // relative marker plus the single following word
        r"(?i)\b(?:by|before|on|due|until)\s+\S*".to_string(),
        format!(r"(?i)\b(?:tomorrow|today|next|this)\s+(?:week|month|{WEEKDAYS})\b"),
        format!(r"(?i)\b(?:{WEEKDAYS})\b"),
        format!(r"(?i)\b(?:{MONTHS})\b"),
        format!(r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\b"),
        format!(r"(?i)\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?\b"),
        r"\b\d{1,2}/\d{1,2}\b".to_string(),
        r"(?i)\b(?:at|by)\s+\d{1,2}:?\d{0,2}\s*(?:am|pm)?\b".to_string(),
        r"(?i)\b(?:in|after)\s+\d+\s+(?:days?|weeks?|months?)\b".to_string(),
    ]
    .into_iter()
    .map(|pattern| Regex::new(&pattern).unwrap())
    .collect()
}
