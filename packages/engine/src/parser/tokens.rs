//! Token definitions for query text

/// Lexical tokens of the query language
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `$`
    Root,
    /// `@`
    Current,
    /// `.`
    Dot,
    /// `..`
    DoubleDot,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Colon,
    /// `?`
    Question,
    /// `*`
    Star,

    /// Quoted string, escapes already decoded
    Str(String),
    /// Number as written; validated by the parser, which knows whether an
    /// integer or any JSON number is wanted
    Number(String),
    True,
    False,
    Null,
    /// Member name shorthand or function name
    Name(String),

    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `!`
    Not,

    Eof,
}

impl Token {
    /// Whether the token can start a literal
    #[inline]
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::Str(_) | Token::Number(_) | Token::True | Token::False | Token::Null
        )
    }

    /// Text a member name shorthand stands for, keywords included (`$.null`)
    #[must_use]
    pub fn member_name(&self) -> Option<&str> {
        match self {
            Token::Name(name) => Some(name),
            Token::True => Some("true"),
            Token::False => Some("false"),
            Token::Null => Some("null"),
            _ => None,
        }
    }
}

/// A token and the byte range it covers in the query text
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

impl Spanned {
    #[must_use]
    pub fn new(token: Token, start: usize, end: usize) -> Self {
        Self { token, start, end }
    }
}
