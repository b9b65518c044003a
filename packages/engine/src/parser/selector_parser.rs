//! Queries, segments and bracketed selectors

use super::core::Parser;
use super::tokens::Token;
use crate::ast::{Anchor, QueryAst, Segment};
use crate::error::ParseResult;

/// Largest magnitude of an index or slice bound (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

impl Parser<'_> {
    /// `$` segments, covering the whole text
    pub(crate) fn parse_query(mut self) -> ParseResult<QueryAst> {
        if self.current().start != 0 || self.peek() != &Token::Root {
            return Err(self.expected_at(0, "\"$\""));
        }
        self.bump();
        let segments = self.parse_segments()?;
        if self.peek() != &Token::Eof {
            return Err(self.expected_here("a segment or end of query"));
        }
        if !self.adjacent() {
            return Err(self.expected_at(self.previous_end(), "a segment after blank space"));
        }
        Ok(QueryAst::root(segments))
    }

    /// `$` or `@` followed by segments, inside a filter
    pub(super) fn parse_embedded_query(&mut self) -> ParseResult<QueryAst> {
        let anchor = match self.bump().token {
            Token::Root => Anchor::Root,
            _ => Anchor::Current,
        };
        let segments = self.parse_segments()?;
        Ok(QueryAst::new(anchor, segments))
    }

    fn parse_segments(&mut self) -> ParseResult<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            let segment = match self.peek() {
                Token::Dot => {
                    self.bump();
                    self.parse_shorthand("a member name or \"*\" after \".\"")?
                }
                Token::DoubleDot => {
                    self.bump();
                    if self.peek() == &Token::LeftBracket && self.adjacent() {
                        Segment::descendant(self.parse_bracketed()?)
                    } else {
                        Segment::descendant(self.parse_shorthand("a member name, \"*\" or \"[\" after \"..\"")?)
                    }
                }
                Token::LeftBracket => self.parse_bracketed()?,
                _ => return Ok(segments),
            };
            segments.push(segment);
        }
    }

    /// Member name or `*` written directly after `.` or `..`
    fn parse_shorthand(&mut self, what: &str) -> ParseResult<Segment> {
        if !self.adjacent() {
            return Err(self.expected_at(self.previous_end(), what));
        }
        if self.peek() == &Token::Star {
            self.bump();
            return Ok(Segment::Wildcard);
        }
        let Some(name) = self.peek().member_name().map(str::to_string) else {
            return Err(self.expected_here(what));
        };
        self.bump();
        Ok(Segment::Key(name))
    }

    /// `[` selector (`,` selector)* `]`; a single selector stands alone
    fn parse_bracketed(&mut self) -> ParseResult<Segment> {
        self.bump();
        let mut selectors = vec![self.parse_selector()?];
        while self.eat(&Token::Comma) {
            selectors.push(self.parse_selector()?);
        }
        self.expect(&Token::RightBracket, "\"]\"")?;
        Ok(if selectors.len() == 1 {
            selectors.remove(0)
        } else {
            Segment::Union(selectors)
        })
    }

    fn parse_selector(&mut self) -> ParseResult<Segment> {
        match self.peek() {
            Token::Str(name) => {
                let name = name.clone();
                self.bump();
                Ok(Segment::Key(name))
            }
            Token::Star => {
                self.bump();
                Ok(Segment::Wildcard)
            }
            Token::Question => self.parse_filter_selector(),
            Token::Number(_) | Token::Colon => self.parse_index_or_slice(),
            _ => Err(self.expected_here("a selector")),
        }
    }

    /// `start`, or `[start]:[end][:[step]]`
    fn parse_index_or_slice(&mut self) -> ParseResult<Segment> {
        let start = self.parse_optional_int()?;
        if !self.eat(&Token::Colon) {
            return match start {
                Some(index) => Ok(Segment::Index(index)),
                None => Err(self.expected_here("an index or slice")),
            };
        }
        let end = self.parse_optional_int()?;
        let step = if self.eat(&Token::Colon) {
            self.parse_optional_int()?
        } else {
            None
        };
        Ok(Segment::slice(start, end, step))
    }

    fn parse_optional_int(&mut self) -> ParseResult<Option<i64>> {
        let Token::Number(lexeme) = self.peek() else {
            return Ok(None);
        };
        let Some(value) = parse_int(lexeme) else {
            return Err(self.expected_here("an integer between -9007199254740991 and 9007199254740991"));
        };
        self.bump();
        Ok(Some(value))
    }
}

/// Integer literal without leading zeros, fraction, exponent or `-0`,
/// within ±(2^53 - 1)
fn parse_int(lexeme: &str) -> Option<i64> {
    let digits = lexeme.strip_prefix('-').unwrap_or(lexeme);
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && ((digits == "0" && !lexeme.starts_with('-')) || !digits.starts_with('0'));
    if !well_formed {
        return None;
    }
    lexeme
        .parse::<i64>()
        .ok()
        .filter(|value| (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_grammar() {
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("-12"), Some(-12));
        assert_eq!(parse_int("9007199254740991"), Some(MAX_SAFE_INTEGER));
        assert_eq!(parse_int("-0"), None);
        assert_eq!(parse_int("01"), None);
        assert_eq!(parse_int("1.0"), None);
        assert_eq!(parse_int("1e2"), None);
        assert_eq!(parse_int("9007199254740992"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }
}
