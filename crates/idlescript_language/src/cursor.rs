//! Token cursor shared by every parser.
//!
//! The cursor is a front-truncatable view over a borrowed token buffer plus
//! an ephemeral scan offset. Parsers either consume destructively or scan
//! ahead speculatively and then commit (take everything scanned) or cancel
//! (forget the scan). Nothing is copied: committing only moves the start.

use crate::token::Token;

/// A cursor over a token sequence with bounded speculative lookahead.
#[derive(Clone, Debug)]
pub struct TokenCursor<'a> {
    /// The full buffer; tokens before `start` have been consumed.
    tokens: &'a [Token],
    /// Index of the first unconsumed token.
    start: usize,
    /// Number of tokens scanned past `start` but not yet committed.
    scan: usize,
}

impl<'a> TokenCursor<'a> {
    /// Creates a cursor over the given tokens.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            start: 0,
            scan: 0,
        }
    }

    /// Removes and returns the front token, cancelling any pending scan.
    ///
    /// Returns `None` at end of input.
    pub fn consume(&mut self) -> Option<&'a Token> {
        self.cancel_scan();
        let token = self.tokens.get(self.start)?;
        self.start += 1;
        Some(token)
    }

    /// Returns the token at the scan offset and advances the offset.
    ///
    /// Nothing is removed. Returns `None` once the offset runs past the end.
    pub fn scan_ahead(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.start + self.scan)?;
        self.scan += 1;
        Some(token)
    }

    /// Removes exactly the scanned tokens from the front and returns them.
    pub fn commit_scanned(&mut self) -> &'a [Token] {
        let tokens: &'a [Token] = self.tokens;
        let taken = &tokens[self.start..self.start + self.scan];
        self.start += self.scan;
        self.scan = 0;
        taken
    }

    /// Discards the pending scan without removing anything.
    pub fn cancel_scan(&mut self) {
        self.scan = 0;
    }

    /// Reads the token `offset` positions past the scan cursor.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.start + self.scan + offset)
    }

    /// Pushes the most recently removed token back onto the front.
    ///
    /// Cancels any pending scan. Does nothing at the very start of the buffer.
    pub fn step_back(&mut self) {
        self.cancel_scan();
        self.start = self.start.saturating_sub(1);
    }

    /// Scans to the end of input and commits everything left.
    pub fn take_remaining(&mut self) -> &'a [Token] {
        while self.scan_ahead().is_some() {}
        self.commit_scanned()
    }

    /// Returns true if no unconsumed tokens remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.tokens.len()
    }

    /// Returns the number of unconsumed tokens.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.start)
    }

    /// Returns the current scan offset.
    #[must_use]
    pub const fn scan_offset(&self) -> usize {
        self.scan
    }
}
