//! Ordered output buffer shared by every mutating operation in a command cycle.
//!
//! Entities and the resolver append lines; only the dispatcher flushes and
//! clears the buffer.
use std::io::{self, Write};

use crate::error::GameError;

/// Ordered, clearable buffer of player-facing lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSink {
    lines: Vec<String>,
}

impl MessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    /// Surfaces a recoverable error as a message and unwraps the success value.
    pub fn report<T, E: GameError>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(
                    target: "game_core::messages",
                    kind = error.kind().as_str(),
                    %error,
                    "Recovered gameplay error"
                );
                self.push(error.to_string());
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns true if any buffered line equals `line`.
    pub fn contains(&self, line: &str) -> bool {
        self.iter().any(|l| l == line)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Removes and returns every buffered line in insertion order.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Writes every buffered line to `out`, then clears the buffer.
    pub fn flush_to(&mut self, out: &mut impl Write) -> io::Result<()> {
        for line in self.lines.drain(..) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameplayError;

    #[test]
    fn flush_preserves_order_and_clears() {
        let mut sink = MessageSink::new();
        sink.push("first");
        sink.extend(["second", "third"]);

        let mut out = Vec::new();
        sink.flush_to(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "first\nsecond\nthird\n");
        assert!(sink.is_empty());
    }

    #[test]
    fn report_pushes_error_text() {
        let mut sink = MessageSink::new();
        let result: Result<(), _> = Err(GameplayError::NoExit);

        assert!(sink.report(result).is_none());
        assert!(sink.contains("You cannot go that way."));
    }

    #[test]
    fn report_passes_success_through() {
        let mut sink = MessageSink::new();
        let value = sink.report(Ok::<_, GameplayError>(7));
        assert_eq!(value, Some(7));
        assert!(sink.is_empty());
    }
}
