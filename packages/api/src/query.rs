//! The `Query` object: a parsed query bound to a function registry

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use jpt_engine::{
    AstError, CollectingSink, Diagnostic, DiagnosticSink, Evaluator, FunctionRegistry, JsonPathParser, LogSink,
    NodeList, ParseError, ParserConfig, QueryAst, QueryParser, Value,
};

use crate::Error;

/// An immutable query, ready to apply to any number of documents
///
/// The AST is owned outright; the registry is shared and never changes
/// once a query holds it. `Query` is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Query {
    ast: QueryAst,
    registry: Arc<FunctionRegistry>,
}

impl Query {
    /// Parse `text` with the built-in functions only
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] with the reason, the failing line and a caret
    /// under the failing column.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        Self::from_text_with(text, Arc::new(FunctionRegistry::new()))
    }

    /// Parse `text` against `registry`, which the query keeps for evaluation
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for text that is not a query.
    pub fn from_text_with(text: &str, registry: Arc<FunctionRegistry>) -> Result<Self, ParseError> {
        let parser = JsonPathParser::new(Arc::clone(&registry));
        Self::from_text_using(text, &parser, registry)
    }

    /// Parse `text` with a bundled parser configured by `config`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an invalid configuration and
    /// [`Error::Parse`] for text that is not a (well-typed, in strict mode) query.
    pub fn from_text_with_config(
        text: &str,
        registry: Arc<FunctionRegistry>,
        config: ParserConfig,
    ) -> Result<Self, Error> {
        let parser = JsonPathParser::with_config(Arc::clone(&registry), config)?;
        Ok(Self::from_text_using(text, &parser, registry)?)
    }

    /// Parse `text` with any [`QueryParser`]
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] built from the parser's failure.
    pub fn from_text_using(
        text: &str,
        parser: &dyn QueryParser,
        registry: Arc<FunctionRegistry>,
    ) -> Result<Self, ParseError> {
        parser
            .parse(text)
            .map(|ast| Self { ast, registry })
            .map_err(|failure| ParseError::from_failure(failure, text))
    }

    /// Wrap an AST built in code, with the built-in functions
    #[must_use]
    pub fn from_ast(ast: QueryAst) -> Self {
        Self {
            ast,
            registry: Arc::new(FunctionRegistry::new()),
        }
    }

    /// Build from the tagged-tuple JSON form (`["$", "a", ["wild"]]`)
    ///
    /// # Errors
    ///
    /// Returns [`AstError`] when `tagged` does not fit the grammar.
    pub fn from_tagged(tagged: &Value) -> Result<Self, AstError> {
        QueryAst::from_tagged(tagged).map(Self::from_ast)
    }

    /// Replace the registry used for evaluation and checks
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<FunctionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn ast(&self) -> &QueryAst {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut QueryAst {
        &mut self.ast
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn into_ast(self) -> QueryAst {
        self.ast
    }

    #[must_use]
    pub fn to_tagged(&self) -> Value {
        self.ast.to_tagged()
    }

    /// Nodes of `document` selected by the query, in document order per
    /// segment; diagnostics are logged as warnings
    #[must_use]
    pub fn apply<'a>(&self, document: &'a Value) -> NodeList<'a> {
        self.apply_with(document, &LogSink)
    }

    /// Like [`apply`](Self::apply), reporting diagnostics to `sink`
    pub fn apply_with<'a>(&self, document: &'a Value, sink: &dyn DiagnosticSink) -> NodeList<'a> {
        Evaluator::new(&self.registry, sink).apply_query(&self.ast, document)
    }

    /// Like [`apply`](Self::apply), also returning the diagnostics raised
    #[must_use]
    pub fn apply_collecting<'a>(&self, document: &'a Value) -> (NodeList<'a>, Vec<Diagnostic>) {
        let sink = CollectingSink::new();
        let nodes = self.apply_with(document, &sink);
        let diagnostics = sink.into_diagnostics();
        if !diagnostics.is_empty() {
            tracing::debug!(target: "jpt::query", query = %self.ast, count = diagnostics.len(), "diagnostics raised");
        }
        (nodes, diagnostics)
    }

    /// Declared-type diagnostics for every filter in the query
    #[must_use]
    pub fn check(&self) -> Vec<Diagnostic> {
        let sink = CollectingSink::new();
        self.registry.check_query(&self.ast, &sink);
        sink.into_diagnostics()
    }

    /// Independent copy: a new AST with no shared subtree, the same registry
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

impl From<QueryAst> for Query {
    fn from(ast: QueryAst) -> Self {
        Self::from_ast(ast)
    }
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_text(text)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.ast, f)
    }
}

impl PartialEq for Query {
    /// Queries are equal when their trees are; registries are not compared
    fn eq(&self, other: &Self) -> bool {
        self.ast == other.ast
    }
}
