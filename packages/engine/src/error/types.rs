//! Structural error types

/// A tagged-tuple AST that does not fit the query grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("malformed query {0}: expected an array starting with \"$\" or \"@\"")]
    MalformedQuery(String),

    #[error("malformed segment {0}")]
    MalformedSegment(String),

    #[error("malformed filter expression {0}")]
    MalformedExpression(String),
}

/// A compact function signature code that cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("function signature code for `{name}` is empty")]
    Empty { name: String },

    #[error("unknown type code '{code}' in signature {signature:?} for `{name}` (expected l, n or v)")]
    UnknownTypeCode {
        name: String,
        code: char,
        signature: String,
    },
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}
