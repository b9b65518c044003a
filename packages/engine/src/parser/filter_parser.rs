//! Filter selectors and the logical expression grammar
//!
//! ```text
//! logical-or   = logical-and *("||" logical-and)
//! logical-and  = basic *("&&" basic)
//! basic        = ["!"] "(" logical-or ")"
//!              / ["!"] (query / function)
//!              / comparable op comparable
//! comparable   = literal / singular query / function
//! ```

use serde_json::Value;

use super::core::{Parser, failure_at};
use super::tokens::Token;
use crate::ast::{CompareOp, FilterExpr, Segment};
use crate::diagnostics::CollectingSink;
use crate::error::ParseResult;

impl Parser<'_> {
    /// `?` logical-expression
    pub(super) fn parse_filter_selector(&mut self) -> ParseResult<Segment> {
        let question = self.bump();
        self.enter(question.start)?;
        self.filter_depth += 1;
        let expr = self.parse_logical_or()?;
        self.filter_depth -= 1;
        self.leave();
        if self.filter_depth == 0 {
            self.check_filter_types(&expr, question.start)?;
        }
        Ok(Segment::Filter(expr))
    }

    /// Declared-type checks over a complete outermost filter, nested filters included
    fn check_filter_types(&self, expr: &FilterExpr, offset: usize) -> ParseResult<()> {
        let collected = CollectingSink::new();
        self.registry.check_filter(expr, &collected);
        let diagnostics = collected.into_diagnostics();
        if self.config.strict_typing {
            if let Some(first) = diagnostics.first() {
                return Err(failure_at(self.text, offset, &format!("Ill-typed filter: {first}")));
            }
        }
        for diagnostic in diagnostics {
            self.sink.report(diagnostic);
        }
        Ok(())
    }

    fn parse_logical_or(&mut self) -> ParseResult<FilterExpr> {
        let mut expr = self.parse_logical_and()?;
        while self.eat(&Token::Or) {
            let rhs = self.parse_logical_and()?;
            expr = FilterExpr::or(expr, rhs);
        }
        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> ParseResult<FilterExpr> {
        let mut expr = self.parse_basic()?;
        while self.eat(&Token::And) {
            let rhs = self.parse_basic()?;
            expr = FilterExpr::and(expr, rhs);
        }
        Ok(expr)
    }

    fn parse_basic(&mut self) -> ParseResult<FilterExpr> {
        if self.eat(&Token::Not) {
            if self.peek() == &Token::LeftParen {
                return Ok(FilterExpr::not(self.parse_paren()?));
            }
            let start = self.current().start;
            return match self.parse_operand()? {
                FilterExpr::Literal(_) => Err(self.expected_at(start, "a query, function or \"(\" after \"!\"")),
                test => Ok(FilterExpr::not(test)),
            };
        }
        if self.peek() == &Token::LeftParen {
            return self.parse_paren();
        }

        let start = self.current().start;
        let lhs = self.parse_operand()?;
        let Some(op) = comparison_op(self.peek()) else {
            return match lhs {
                FilterExpr::Literal(_) => Err(self.expected_here("a comparison operator")),
                test => Ok(test),
            };
        };
        self.bump();
        self.require_comparable(&lhs, start)?;
        let rhs_start = self.current().start;
        let rhs = self.parse_operand()?;
        self.require_comparable(&rhs, rhs_start)?;
        Ok(FilterExpr::compare(op, lhs, rhs))
    }

    fn parse_paren(&mut self) -> ParseResult<FilterExpr> {
        let open = self.bump();
        self.enter(open.start)?;
        let expr = self.parse_logical_or()?;
        self.expect(&Token::RightParen, "\")\"")?;
        self.leave();
        Ok(expr)
    }

    /// Literal, embedded query or function call
    fn parse_operand(&mut self) -> ParseResult<FilterExpr> {
        let is_call = matches!(self.peek(), Token::Name(_)) && self.peek_at(1) == &Token::LeftParen;
        match self.peek() {
            Token::Root | Token::Current => Ok(FilterExpr::Query(self.parse_embedded_query()?)),
            _ if is_call => self.parse_function(),
            _ if self.peek().is_literal() => self.parse_literal(),
            _ => Err(self.expected_here("a literal, query or function")),
        }
    }

    /// Queries must be singular to be compared
    fn require_comparable(&self, expr: &FilterExpr, offset: usize) -> ParseResult<()> {
        match expr {
            FilterExpr::Query(query) if !query.is_singular() => {
                Err(self.expected_at(offset, "a singular query (names and indexes only)"))
            }
            _ => Ok(()),
        }
    }

    fn parse_literal(&mut self) -> ParseResult<FilterExpr> {
        let literal = self.bump();
        let value = match literal.token {
            Token::Str(text) => Value::String(text),
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Null => Value::Null,
            Token::Number(lexeme) => serde_json::from_str::<Value>(&lexeme)
                .ok()
                .filter(Value::is_number)
                .ok_or_else(|| self.expected_at(literal.start, "a JSON number"))?,
            _ => return Err(self.expected_at(literal.start, "a literal")),
        };
        Ok(FilterExpr::Literal(value))
    }

    /// name `(` [argument *(`,` argument)] `)`
    fn parse_function(&mut self) -> ParseResult<FilterExpr> {
        let name_token = self.bump();
        let Token::Name(name) = name_token.token else {
            return Err(self.expected_at(name_token.start, "a function name"));
        };
        if !is_function_name(&name) {
            return Err(self.expected_at(name_token.start, "a function name (lowercase letters, digits, \"_\")"));
        }
        if !self.adjacent() {
            return Err(self.expected_at(name_token.end, "\"(\" directly after the function name"));
        }
        let open = self.bump();
        self.enter(open.start)?;
        let mut args = Vec::new();
        if self.peek() != &Token::RightParen {
            args.push(self.parse_argument()?);
            while self.eat(&Token::Comma) {
                args.push(self.parse_argument()?);
            }
        }
        self.expect(&Token::RightParen, "\",\" or \")\"")?;
        self.leave();
        Ok(FilterExpr::call(name, args))
    }

    /// A bare literal, or any logical expression (queries and calls included)
    fn parse_argument(&mut self) -> ParseResult<FilterExpr> {
        if self.peek().is_literal() && matches!(self.peek_at(1), Token::Comma | Token::RightParen) {
            return self.parse_literal();
        }
        self.parse_logical_or()
    }
}

fn comparison_op(token: &Token) -> Option<CompareOp> {
    match token {
        Token::Equal => Some(CompareOp::Eq),
        Token::NotEqual => Some(CompareOp::Ne),
        Token::Less => Some(CompareOp::Lt),
        Token::LessEq => Some(CompareOp::Le),
        Token::Greater => Some(CompareOp::Gt),
        Token::GreaterEq => Some(CompareOp::Ge),
        _ => None,
    }
}

fn is_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
