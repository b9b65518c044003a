//! # jpt
//!
//! JSONPath queries over `serde_json` documents.
//!
//! A [`Query`] is parsed once (or built from an AST) and applied to any
//! number of documents. Results are node lists borrowing from the document.
//! Filter problems that are not syntax errors (unknown functions, wrong
//! argument types, bad regular expressions) never abort evaluation: they are
//! reported as [`Diagnostic`]s and a defined fallback value is used.
//!
//! ```rust
//! use jpt::Query;
//! use serde_json::json;
//!
//! let query = Query::from_text("$..book[?@.price < 10].title").unwrap();
//! let doc = json!({"store": {"book": [
//!     {"title": "Sayings", "price": 8.95},
//!     {"title": "Sword", "price": 12.99}
//! ]}});
//! assert_eq!(query.apply(&doc).to_values(), vec![json!("Sayings")]);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

mod query;

pub use query::Query;

// Re-export the engine types callers work with
pub use jpt_engine::{
    Anchor, AstError, CollectingSink, CompareOp, ConfigurationError, Diagnostic, DiagnosticSink, FilterExpr,
    FunctionExtension, FunctionRegistry, FunctionSignature, FunctionType, IgnoreSink, JsonPathParser, LogSink, Node,
    NodeList, ParseError, ParseFailure, ParserConfig, QueryAst, QueryParser, Scalar, Segment, SignatureError, Typed,
    Value,
};

/// Any error raised while building a query
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Ast(#[from] AstError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Result type for query construction
pub type Result<T> = std::result::Result<T, Error>;
