//! Parser state and failure construction
//!
//! Failures read like `Expected "]" at line 1, column 5 (byte 5) after $[1 `:
//! line and column are 1-based (columns count characters), the byte number
//! is the 1-based byte position, and the text consumed so far follows
//! `after`.

use super::tokens::{Spanned, Token};
use crate::config::ParserConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::{ParseFailure, ParseResult};
use crate::type_system::FunctionRegistry;

/// 1-based line and character column of byte `offset` in `text`
pub(crate) fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
    (line, column)
}

/// `Expected <what>` failure at byte `offset`
pub(crate) fn expected(text: &str, offset: usize, what: &str) -> ParseFailure {
    let (line, column) = line_column(text, offset);
    let mut reason = format!(
        "Expected {what} at line {line}, column {column} (byte {})",
        offset + 1
    );
    if let Some(consumed) = text.get(..offset).filter(|consumed| !consumed.is_empty()) {
        reason.push_str(" after ");
        reason.push_str(consumed);
    }
    ParseFailure::new(reason, line, column).with_expected(vec![what.to_string()])
}

/// Failure with a free-form message at byte `offset`
pub(crate) fn failure_at(text: &str, offset: usize, message: &str) -> ParseFailure {
    let (line, column) = line_column(text, offset);
    ParseFailure::new(
        format!("{message} at line {line}, column {column} (byte {})", offset + 1),
        line,
        column,
    )
}

/// Recursive-descent state over a token vector
pub(crate) struct Parser<'p> {
    pub(super) text: &'p str,
    tokens: Vec<Spanned>,
    pos: usize,
    eof: Spanned,
    depth: usize,
    pub(super) filter_depth: usize,
    pub(super) config: &'p ParserConfig,
    pub(super) registry: &'p FunctionRegistry,
    pub(super) sink: &'p dyn DiagnosticSink,
}

impl<'p> Parser<'p> {
    pub(crate) fn new(
        text: &'p str,
        tokens: Vec<Spanned>,
        config: &'p ParserConfig,
        registry: &'p FunctionRegistry,
        sink: &'p dyn DiagnosticSink,
    ) -> Self {
        Self {
            text,
            tokens,
            pos: 0,
            eof: Spanned::new(Token::Eof, text.len(), text.len()),
            depth: 0,
            filter_depth: 0,
            config,
            registry,
            sink,
        }
    }

    #[inline]
    pub(super) fn current(&self) -> &Spanned {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub(super) fn peek(&self) -> &Token {
        &self.current().token
    }

    /// Token `n` places after the current one
    pub(super) fn peek_at(&self, n: usize) -> &Token {
        self.tokens
            .get(self.pos + n)
            .map_or(&self.eof.token, |spanned| &spanned.token)
    }

    /// Consume the current token; `Eof` is never consumed
    pub(super) fn bump(&mut self) -> Spanned {
        let spanned = self.current().clone();
        if spanned.token != Token::Eof {
            self.pos += 1;
        }
        spanned
    }

    /// Consume the current token if it equals `token`
    pub(super) fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, token: &Token, what: &str) -> ParseResult<Spanned> {
        if self.peek() == token {
            Ok(self.bump())
        } else {
            Err(self.expected_here(what))
        }
    }

    /// End of the last consumed token
    pub(super) fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |spanned| spanned.end)
    }

    /// Whether the current token directly follows the previous one
    pub(super) fn adjacent(&self) -> bool {
        self.current().start == self.previous_end()
    }

    pub(super) fn expected_here(&self, what: &str) -> ParseFailure {
        expected(self.text, self.current().start, what)
    }

    pub(super) fn expected_at(&self, offset: usize, what: &str) -> ParseFailure {
        expected(self.text, offset, what)
    }

    /// One level deeper into parentheses, filters or function arguments
    pub(super) fn enter(&mut self, offset: usize) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.config.max_nesting_depth {
            return Err(failure_at(
                self.text,
                offset,
                &format!("Nesting deeper than {} levels", self.config.max_nesting_depth),
            ));
        }
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
