//! Code-point scanner for grammar input
//!
//! An immutable sequence of decoded code points plus a mutable cursor.
//! The scanner carries no grammar knowledge; the parser drives it with
//! lookahead tests, unconditional advances, and checkpoint/rewind pairs
//! for backtracking.

use crate::error::Pos;

/// Opaque cursor snapshot for O(1) save/restore during backtracking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Scanner over a decoded code-point buffer with cursor tracking
#[derive(Clone, Debug)]
pub struct Scanner {
    source: Vec<char>,
    cursor: usize,
}

impl Scanner {
    /// Create a scanner over already-decoded text
    pub fn new(input: &str) -> Self {
        Self {
            source: input.chars().collect(),
            cursor: 0,
        }
    }

    /// Create a scanner over a code-point sequence
    pub const fn from_code_points(source: Vec<char>) -> Self {
        Self { source, cursor: 0 }
    }

    /// Get current code point without consuming
    pub fn peek(&self) -> Option<char> {
        self.source.get(self.cursor).copied()
    }

    /// Get the code point `n` positions past the cursor without consuming
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.source.get(self.cursor.checked_add(n)?).copied()
    }

    /// Advance cursor by one code point
    pub fn advance(&mut self) {
        if self.cursor < self.source.len() {
            self.cursor += 1;
        }
    }

    /// Advance cursor by `n` code points
    pub fn advance_by(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n).min(self.source.len());
    }

    /// Non-consuming test against the current code point
    pub fn matches_char(&self, c: char) -> bool {
        self.peek() == Some(c)
    }

    /// Non-consuming test for a literal at the cursor
    pub fn matches_literal(&self, literal: &str) -> bool {
        let mut idx = self.cursor;
        for expected in literal.chars() {
            match self.source.get(idx) {
                Some(&found) if found == expected => idx += 1,
                _ => return false,
            }
        }
        true
    }

    /// Consume the current code point if it matches
    pub fn consume_char(&mut self, c: char) -> bool {
        if self.matches_char(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a literal if it matches at the cursor
    pub fn consume_literal(&mut self, literal: &str) -> bool {
        if self.matches_literal(literal) {
            self.advance_by(literal.chars().count());
            true
        } else {
            false
        }
    }

    /// Check if the cursor reached end of input
    pub fn at_end(&self) -> bool {
        self.cursor >= self.source.len()
    }

    /// Cursor offset in code points
    pub const fn offset(&self) -> usize {
        self.cursor
    }

    /// Take a snapshot of the cursor
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.cursor)
    }

    /// Restore the cursor to a snapshot taken earlier
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.0;
    }

    /// Current position with line/column derived from the buffer.
    ///
    /// Line and column are computed by walking the consumed prefix, so
    /// this is only called when building a diagnostic; the hot path
    /// carries nothing but the integer cursor.
    pub fn pos(&self) -> Pos {
        let mut line: u32 = 1;
        let mut col: u32 = 1;
        for &c in self.source.iter().take(self.cursor) {
            if c == '\n' {
                line = line.saturating_add(1);
                col = 1;
            } else {
                col = col.saturating_add(1);
            }
        }
        Pos::new(self.cursor, line, col)
    }
}
