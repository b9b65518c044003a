//! Parse failures and their user-facing rendering

/// Raw failure reported by a [`QueryParser`](crate::parser::QueryParser)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ParseFailure {
    /// Human-readable reason
    pub reason: String,
    /// 1-based line of the failure within the query text
    pub line: usize,
    /// 1-based column, counted in characters
    pub column: usize,
    /// Tokens or rules that would have been accepted next, when known
    pub expected: Vec<String>,
}

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseFailure>;

impl ParseFailure {
    pub fn new(reason: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            reason: reason.into(),
            line,
            column,
            expected: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }
}

/// Fatal error for query text that cannot be turned into a query
///
/// The message is multi-line: the parser's reason, the bare "Expected ..."
/// clause when the reason has one, the offending source line, and a caret
/// line pointing at the failure column:
///
/// ```text
/// Expected "]" at line 1, column 5 (byte 5) after $[1
/// Expected "]" at line 1, column 5 (byte 5):
/// $[1 2]
/// ~~~~^
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    #[source]
    failure: ParseFailure,
}

impl ParseError {
    /// Render `failure` against the text it was produced for
    #[must_use]
    pub fn from_failure(failure: ParseFailure, text: &str) -> Self {
        let mut parts = vec![failure.reason.clone()];
        if let Some(clause) = expected_clause(&failure.reason) {
            parts.push(format!("{}:", clause.replace('\n', "<<<NEWLINE>>>")));
        }
        if let Some(line) = failure
            .line
            .checked_sub(1)
            .and_then(|index| text.lines().nth(index))
        {
            parts.push(line.to_string());
            parts.push(format!("{}^", "~".repeat(failure.column.saturating_sub(1))));
        }
        Self {
            message: parts.join("\n"),
            failure,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn failure(&self) -> &ParseFailure {
        &self.failure
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.failure.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.failure.column
    }
}

/// The `Expected ...` part of a reason, up to its last ` after`
///
/// The clause must start at the beginning of a line and may span lines.
fn expected_clause(reason: &str) -> Option<&str> {
    const PREFIX: &str = "Expected ";
    let line_starts = std::iter::once(0).chain(reason.match_indices('\n').map(|(i, _)| i + 1));
    for start in line_starts {
        let rest = &reason[start..];
        if !rest.starts_with(PREFIX) {
            continue;
        }
        if let Some(pos) = rest.rfind(" after") {
            if pos > PREFIX.len() {
                return Some(&rest[..pos]);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reason_clause_line_and_caret() {
        let failure = ParseFailure::new("Expected \"]\" at line 1, column 5 (byte 5) after $[1", 1, 5);
        let error = ParseError::from_failure(failure, "$[1 2]");
        assert_eq!(
            error.message(),
            "Expected \"]\" at line 1, column 5 (byte 5) after $[1\n\
             Expected \"]\" at line 1, column 5 (byte 5):\n\
             $[1 2]\n\
             ~~~~^"
        );
    }

    #[test]
    fn picks_the_failing_line_of_multi_line_text() {
        let failure = ParseFailure::new("unterminated string", 2, 3);
        let error = ParseError::from_failure(failure, "$[?@.a ==\n  'oops]\n");
        assert_eq!(error.to_string(), "unterminated string\n  'oops]\n~~^");
        assert_eq!((error.line(), error.column()), (2, 3));
    }

    #[test]
    fn skips_source_line_when_out_of_range() {
        let failure = ParseFailure::new("Expected query", 3, 1);
        assert_eq!(ParseError::from_failure(failure, "$").message(), "Expected query");
    }

    #[test]
    fn clause_may_span_lines() {
        assert_eq!(
            expected_clause("bad input\nExpected one of\n\"]\", \",\" after $[1"),
            Some("Expected one of\n\"]\", \",\"")
        );
        assert_eq!(expected_clause("Expected  after"), None);
        assert_eq!(expected_clause("something Expected x after y"), None);
    }
}
