//! Lexical analysis of query text
//!
//! Produces tokens with their byte spans. Blank space (space, tab, line
//! feed, carriage return) separates tokens and is otherwise dropped; the
//! parser uses the spans where the grammar forbids it.

use std::iter::Peekable;
use std::str::CharIndices;

use super::core::expected;
use super::tokens::{Spanned, Token};
use crate::error::ParseResult;

/// Split `text` into tokens, ending with [`Token::Eof`]
pub(crate) fn tokenize(text: &str) -> ParseResult<Vec<Spanned>> {
    let mut scanner = Scanner {
        text,
        chars: text.char_indices().peekable(),
    };
    let mut tokens = Vec::new();
    while let Some((start, c)) = scanner.chars.next() {
        let token = match c {
            ' ' | '\t' | '\n' | '\r' => continue,
            '$' => Token::Root,
            '@' => Token::Current,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '?' => Token::Question,
            '*' => Token::Star,
            '.' => {
                if scanner.eat('.') {
                    Token::DoubleDot
                } else {
                    Token::Dot
                }
            }
            '=' => {
                if !scanner.eat('=') {
                    return Err(expected(text, start, "\"==\""));
                }
                Token::Equal
            }
            '!' => {
                if scanner.eat('=') {
                    Token::NotEqual
                } else {
                    Token::Not
                }
            }
            '<' => {
                if scanner.eat('=') {
                    Token::LessEq
                } else {
                    Token::Less
                }
            }
            '>' => {
                if scanner.eat('=') {
                    Token::GreaterEq
                } else {
                    Token::Greater
                }
            }
            '&' => {
                if !scanner.eat('&') {
                    return Err(expected(text, start, "\"&&\""));
                }
                Token::And
            }
            '|' => {
                if !scanner.eat('|') {
                    return Err(expected(text, start, "\"||\""));
                }
                Token::Or
            }
            '\'' | '"' => scanner.string(start, c)?,
            '-' | '0'..='9' => scanner.number(start, c)?,
            c if is_name_first(c) => scanner.name(start),
            _ => return Err(expected(text, start, "a selector, operator or literal")),
        };
        tokens.push(Spanned::new(token, start, scanner.offset()));
    }
    tokens.push(Spanned::new(Token::Eof, text.len(), text.len()));
    Ok(tokens)
}

/// First character of a member name shorthand
fn is_name_first(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_first(c) || c.is_ascii_digit()
}

struct Scanner<'t> {
    text: &'t str,
    chars: Peekable<CharIndices<'t>>,
}

impl Scanner<'_> {
    /// Byte offset of the next unread character
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.text.len(), |&(i, _)| i)
    }

    fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while self.chars.next_if(|(_, c)| c.is_ascii_digit()).is_some() {
            count += 1;
        }
        count
    }

    /// `-`? digits (`.` digits)? ([eE] [+-]? digits)?
    fn number(&mut self, start: usize, first: char) -> ParseResult<Token> {
        if first == '-' && self.eat_digits() == 0 {
            return Err(expected(self.text, self.offset(), "digit"));
        }
        if first != '-' {
            self.eat_digits();
        }
        if self.eat('.') && self.eat_digits() == 0 {
            return Err(expected(self.text, self.offset(), "digit"));
        }
        if self.eat('e') || self.eat('E') {
            if !self.eat('+') {
                self.eat('-');
            }
            if self.eat_digits() == 0 {
                return Err(expected(self.text, self.offset(), "digit"));
            }
        }
        let end = self.offset();
        Ok(Token::Number(self.text[start..end].to_string()))
    }

    fn name(&mut self, start: usize) -> Token {
        while self.chars.next_if(|&(_, c)| is_name_char(c)).is_some() {}
        let end = self.offset();
        match &self.text[start..end] {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            name => Token::Name(name.to_string()),
        }
    }

    /// Quoted string; the opening quote is already consumed
    fn string(&mut self, start: usize, quote: char) -> ParseResult<Token> {
        let mut value = String::new();
        loop {
            let Some((offset, c)) = self.chars.next() else {
                let closing = if quote == '\'' { "\"'\"" } else { "'\"'" };
                return Err(expected(self.text, start, &format!("closing {closing}")));
            };
            match c {
                c if c == quote => return Ok(Token::Str(value)),
                '\\' => self.escape(offset, quote, &mut value)?,
                c if u32::from(c) < 0x20 => {
                    return Err(expected(self.text, offset, "escaped control character"));
                }
                c => value.push(c),
            }
        }
    }

    /// One escape sequence after its backslash at `offset`
    fn escape(&mut self, offset: usize, quote: char, value: &mut String) -> ParseResult<()> {
        let decoded = match self.chars.next().map(|(_, c)| c) {
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('/') => '/',
            Some('\\') => '\\',
            Some(c) if c == quote => c,
            Some('u') => self.unicode_escape(offset)?,
            _ => return Err(expected(self.text, offset, "valid escape sequence")),
        };
        value.push(decoded);
        Ok(())
    }

    /// `XXXX` after `\u`, combining a surrogate pair when needed
    fn unicode_escape(&mut self, offset: usize) -> ParseResult<char> {
        let high = self.hex4(offset)?;
        let code_point = match high {
            0xD800..=0xDBFF => {
                if !(self.eat('\\') && self.eat('u')) {
                    return Err(expected(self.text, offset, "low surrogate escape after high surrogate"));
                }
                let low = self.hex4(offset)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(expected(self.text, offset, "low surrogate escape after high surrogate"));
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(expected(self.text, offset, "high surrogate before low surrogate"));
            }
            other => other,
        };
        char::from_u32(code_point).ok_or_else(|| expected(self.text, offset, "valid unicode escape"))
    }

    fn hex4(&mut self, offset: usize) -> ParseResult<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .chars
                .next()
                .and_then(|(_, c)| c.to_digit(16))
                .ok_or_else(|| expected(self.text, offset, "four hex digits after \\u"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }
}
