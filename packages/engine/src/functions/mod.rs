//! Function extensions of the filter language
//!
//! Four built-ins are evaluated here:
//! - `length(value)`: characters, elements or members
//! - `count(nodes)`: size of a node list
//! - `match(string, pattern)`: the whole string matches
//! - `search(string, pattern)`: some substring matches
//!
//! Any other name is looked up in the registry for an extension evaluator.
//! A name without one (including names registered with a signature only)
//! yields `false` with an unknown-function diagnostic.

mod builtins;
pub mod regex_cache;

pub use regex_cache::{REGEX_CACHE, RegexCache};

use serde_json::Value;

use self::builtins::Anchoring;
use crate::ast::FilterExpr;
use crate::diagnostics::Diagnostic;
use crate::evaluator::Evaluator;
use crate::type_system::{BUILTIN_FUNCTIONS, Typed};
use crate::value::{NodeList, Scalar};

impl Evaluator<'_> {
    pub(crate) fn call_function<'a>(
        &self,
        name: &str,
        args: &[FilterExpr],
        root: &'a Value,
        current: &NodeList<'a>,
    ) -> Typed<'a> {
        match (name, args) {
            ("length", [value]) => builtins::length(&self.scalar_arg(value, root, current)),
            ("count", [nodes]) => builtins::count(&self.eval_expr(nodes, root, current), self.sink()),
            ("match", [subject, pattern]) => Typed::Logical(builtins::regex_test(
                &self.scalar_arg(subject, root, current),
                &self.scalar_arg(pattern, root, current),
                Anchoring::Whole,
                self.sink(),
            )),
            ("search", [subject, pattern]) => Typed::Logical(builtins::regex_test(
                &self.scalar_arg(subject, root, current),
                &self.scalar_arg(pattern, root, current),
                Anchoring::Anywhere,
                self.sink(),
            )),
            _ => match builtin_arity(name) {
                Some(expected) => self.arity_mismatch(name, expected, args.len()),
                None => self.call_extension(name, args, root, current),
            },
        }
    }

    fn scalar_arg<'a>(&self, arg: &FilterExpr, root: &'a Value, current: &NodeList<'a>) -> Scalar<'a> {
        self.eval_expr(arg, root, current).into_scalar()
    }

    fn call_extension<'a>(
        &self,
        name: &str,
        args: &[FilterExpr],
        root: &'a Value,
        current: &NodeList<'a>,
    ) -> Typed<'a> {
        let Some(extension) = self.registry().extension(name) else {
            self.sink().report(Diagnostic::UnknownFunction {
                function: name.to_string(),
            });
            return Typed::Logical(false);
        };
        if let Some(signature) = self.registry().signature(name) {
            if signature.arity() != args.len() {
                return self.arity_mismatch(name, signature.arity(), args.len());
            }
        }
        let args: Vec<Typed<'a>> = args
            .iter()
            .map(|arg| self.eval_expr(arg, root, current))
            .collect();
        tracing::trace!(target: "jpt::evaluator", function = name, args = args.len(), "calling extension");
        extension.call(args)
    }

    fn arity_mismatch<'a>(&self, name: &str, expected: usize, found: usize) -> Typed<'a> {
        self.sink().report(Diagnostic::ArityMismatch {
            function: name.to_string(),
            expected,
            found,
        });
        Typed::Logical(false)
    }
}

fn builtin_arity(name: &str) -> Option<usize> {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, code)| code.len() - 1)
}
