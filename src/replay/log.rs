//! Human-readable log of consumed events.

use serde::{Deserialize, Serialize};

/// One line per consumed event, in order.
///
/// Grows by one line per step; only [`TraceLog::clear`] shrinks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLog {
    lines: Vec<String>,
}

impl TraceLog {
    /// Empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    /// All lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The last `count` lines (fewer if the log is shorter).
    #[must_use]
    pub fn tail(&self, count: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(count);
        &self.lines[start..]
    }

    /// Most recent line.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
