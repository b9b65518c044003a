//! Built-in function bodies: `length`, `count`, `match` and `search`

use serde_json::Value;

use super::regex_cache::REGEX_CACHE;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::type_system::Typed;
use crate::value::Scalar;

/// How a pattern must cover the subject string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchoring {
    /// `match()`: the whole string
    Whole,
    /// `search()`: any substring
    Anywhere,
}

/// Characters of a string, elements of an array, members of an object;
/// absent for anything else
pub(crate) fn length<'a>(value: &Scalar<'_>) -> Typed<'a> {
    let len = match value.as_value() {
        Some(Value::String(text)) => text.chars().count(),
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(members)) => members.len(),
        _ => return Typed::Value(Scalar::Absent),
    };
    Typed::Value(Scalar::Owned(Value::from(len)))
}

/// Number of nodes; an argument that is not a node list counts as 0
pub(crate) fn count<'a>(arg: &Typed<'_>, sink: &dyn DiagnosticSink) -> Typed<'a> {
    let count = match arg {
        Typed::Nodes(nodes) => nodes.len(),
        other => {
            sink.report(Diagnostic::CountArgumentNotNodes {
                found: other.type_of(),
            });
            0
        }
    };
    Typed::Value(Scalar::Owned(Value::from(count)))
}

/// Whether `subject` matches `pattern`; false unless both are strings and
/// the pattern compiles
pub(crate) fn regex_test(
    subject: &Scalar<'_>,
    pattern: &Scalar<'_>,
    anchoring: Anchoring,
    sink: &dyn DiagnosticSink,
) -> bool {
    let (Some(Value::String(subject)), Some(Value::String(pattern))) = (subject.as_value(), pattern.as_value())
    else {
        return false;
    };
    // The bare pattern must compile on its own so a stray `)` cannot close the anchoring group.
    let regex = match REGEX_CACHE.get_or_compile(pattern) {
        Ok(regex) => regex,
        Err(error) => {
            sink.report(Diagnostic::InvalidPattern {
                pattern: pattern.clone(),
                reason: error.to_string(),
            });
            return false;
        }
    };
    match anchoring {
        Anchoring::Anywhere => regex.is_match(subject),
        Anchoring::Whole => match REGEX_CACHE.get_or_compile(&format!(r"\A(?:{pattern})\z")) {
            Ok(anchored) => anchored.is_match(subject),
            Err(error) => {
                sink.report(Diagnostic::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: error.to_string(),
                });
                false
            }
        },
    }
}
