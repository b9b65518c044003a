//! # JSONPath evaluation engine
//!
//! Typed interpreter for JSONPath queries over `serde_json` documents.
//!
//! ## Features
//!
//! - **Closed AST** shared by path selectors and filter predicates, with a
//!   canonical text form and a tagged-tuple JSON form
//! - **Three-valued filter typing** (`value`, `nodes`, `logical`) with
//!   static declared-type checks
//! - **Extensible function registry**: `length`, `count`, `match` and
//!   `search` built in; new signatures and evaluators can be registered
//! - **Non-fatal diagnostics** routed to a pluggable sink
//! - **Bundled RFC 9535 parser** with line/column failures
//!
//! ## Usage
//!
//! ```rust
//! use jpt_engine::{Evaluator, FunctionRegistry, IgnoreSink, JsonPathParser, QueryParser};
//! use serde_json::json;
//!
//! let ast = JsonPathParser::default().parse("$.items[?@.price < 10].name").unwrap();
//! let doc = json!({"items": [{"name": "pen", "price": 2}, {"name": "lamp", "price": 40}]});
//! let registry = FunctionRegistry::new();
//! let names = Evaluator::new(&registry, &IgnoreSink).apply_query(&ast, &doc);
//! assert_eq!(names.to_values(), vec![json!("pen")]);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod type_system;
pub mod value;

pub use ast::{Anchor, CompareOp, FilterExpr, QueryAst, Segment};
pub use config::ParserConfig;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, IgnoreSink, LogSink};
pub use error::{AstError, ConfigurationError, ParseError, ParseFailure, ParseResult, SignatureError};
pub use evaluator::Evaluator;
pub use parser::{JsonPathParser, QueryParser};
pub use type_system::{FunctionExtension, FunctionRegistry, FunctionSignature, FunctionType, Typed};
pub use value::{Node, NodeList, Scalar, Value};
