//! Error types
//!
//! Only malformed input is an error: query text that does not parse, a
//! tagged-tuple tree that does not fit the grammar, or a bad function
//! signature code. Semantic problems found while evaluating are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.

mod parse;
mod types;

pub use parse::{ParseError, ParseFailure, ParseResult};
pub use types::{AstError, ConfigurationError, SignatureError};
