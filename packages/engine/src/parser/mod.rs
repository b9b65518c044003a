//! Query text parsing
//!
//! The evaluator only needs an AST; anything implementing [`QueryParser`]
//! can supply one. [`JsonPathParser`] is the bundled implementation of the
//! RFC 9535 surface syntax:
//! - `tokenizer`: text to spanned tokens
//! - `selector_parser`: query, segments, bracketed selectors, slices
//! - `filter_parser`: logical expressions, comparisons, function calls

mod core;
mod filter_parser;
mod selector_parser;
mod tokenizer;
mod tokens;

pub use selector_parser::MAX_SAFE_INTEGER;
pub use tokens::{Spanned, Token};

use std::sync::Arc;

use self::core::Parser;
use crate::ast::QueryAst;
use crate::config::ParserConfig;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::{ConfigurationError, ParseResult};
use crate::type_system::FunctionRegistry;

/// Turns query text into an AST
pub trait QueryParser {
    /// # Errors
    ///
    /// Returns a [`ParseFailure`](crate::error::ParseFailure) locating the
    /// first point where `text` stops being a valid query.
    fn parse(&self, text: &str) -> ParseResult<QueryAst>;
}

/// Recursive-descent parser for JSONPath query text
///
/// Function calls are checked against the registry as soon as an outermost
/// filter is complete. Problems are reported as diagnostics, or fail the
/// parse when the configuration asks for strict typing.
#[derive(Debug, Clone)]
pub struct JsonPathParser {
    registry: Arc<FunctionRegistry>,
    config: ParserConfig,
}

impl JsonPathParser {
    #[must_use]
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self {
            registry,
            config: ParserConfig::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when `config` does not validate.
    pub fn with_config(registry: Arc<FunctionRegistry>, config: ParserConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `text`, reporting type diagnostics to `sink`
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`](crate::error::ParseFailure) for text that
    /// is not a query, and in strict mode for a query with a type error.
    pub fn parse_with(&self, text: &str, sink: &dyn DiagnosticSink) -> ParseResult<QueryAst> {
        let result = tokenizer::tokenize(text)
            .and_then(|tokens| Parser::new(text, tokens, &self.config, &self.registry, sink).parse_query());
        match &result {
            Ok(ast) => tracing::trace!(target: "jpt::parser", query = %ast, "parsed query"),
            Err(failure) => tracing::debug!(
                target: "jpt::parser",
                line = failure.line,
                column = failure.column,
                reason = %failure.reason,
                "query text rejected"
            ),
        }
        result
    }
}

impl Default for JsonPathParser {
    fn default() -> Self {
        Self::new(Arc::new(FunctionRegistry::new()))
    }
}

impl QueryParser for JsonPathParser {
    fn parse(&self, text: &str) -> ParseResult<QueryAst> {
        self.parse_with(text, &LogSink)
    }
}
