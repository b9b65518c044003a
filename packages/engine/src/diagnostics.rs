//! Non-fatal diagnostics
//!
//! Arity mismatches, unknown functions, declared-type mismatches, a
//! non-nodelist argument to `count()` and unusable regular expressions are
//! warnings: evaluation carries on with a defined fallback value and reports
//! the problem to a [`DiagnosticSink`].

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;

use crate::type_system::FunctionType;

/// A semantic problem found while checking or evaluating a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Call with a different number of arguments than the signature declares
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
    /// No signature registered, or no evaluator for the name
    UnknownFunction { function: String },
    /// Expression used where its declared type is not accepted
    TypeMismatch {
        expression: String,
        declared: Option<FunctionType>,
        required: FunctionType,
        context: Option<String>,
    },
    /// `count()` applied to something that is not a node list
    CountArgumentNotNodes { found: FunctionType },
    /// `match()` / `search()` pattern that does not compile
    InvalidPattern { pattern: String, reason: String },
}

impl Diagnostic {
    /// Short machine-readable name of the variant
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::ArityMismatch { .. } => "arity_mismatch",
            Diagnostic::UnknownFunction { .. } => "unknown_function",
            Diagnostic::TypeMismatch { .. } => "type_mismatch",
            Diagnostic::CountArgumentNotNodes { .. } => "count_argument_not_nodes",
            Diagnostic::InvalidPattern { .. } => "invalid_pattern",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ArityMismatch {
                function,
                expected,
                found,
            } => write!(
                f,
                "incorrect number of arguments for {function}(): expected {expected}, found {found}"
            ),
            Diagnostic::UnknownFunction { function } => {
                write!(f, "unknown function extension {function}()")
            }
            Diagnostic::TypeMismatch {
                expression,
                declared,
                required,
                context,
            } => {
                let declared = declared.map_or("undefined", FunctionType::name);
                write!(
                    f,
                    "cannot use {expression} with declared type {declared} for required type {}",
                    required.name()
                )?;
                if let Some(context) = context {
                    write!(f, " in {context}")?;
                }
                Ok(())
            }
            Diagnostic::CountArgumentNotNodes { found } => {
                write!(f, "count() argument has type {}, expected nodes", found.name())
            }
            Diagnostic::InvalidPattern { pattern, reason } => {
                write!(f, "invalid regular expression {pattern:?}: {reason}")
            }
        }
    }
}

/// Receiver of diagnostics
///
/// Takes `&self` so one sink can be shared by a whole evaluation, including
/// nested sub-queries.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a `tracing` warning under `jpt::diagnostics`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            target: "jpt::diagnostics",
            kind = diagnostic.kind(),
            "{diagnostic}"
        );
    }
}

/// Drops every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreSink;

impl DiagnosticSink for IgnoreSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Records diagnostics for later inspection
#[derive(Debug, Default)]
pub struct CollectingSink {
    collected: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collected.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collected.borrow().is_empty()
    }

    /// Copy of everything reported so far
    #[must_use]
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.collected.borrow().clone()
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.collected.into_inner()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.collected.borrow_mut().push(diagnostic);
    }
}
