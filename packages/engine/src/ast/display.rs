//! Canonical text form of the AST
//!
//! Member names are always written in bracket notation with single quotes,
//! so the output is accepted by the bundled parser and parses back to an
//! equal tree. A descendant segment nested inside a union has no surface
//! syntax; it is written as `..` inside the brackets and will not re-parse.

use std::fmt::{self, Display, Formatter, Write};

use super::{FilterExpr, QueryAst, Segment};

impl Display for QueryAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor.symbol())?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Descendant(inner) => {
                f.write_str("..")?;
                write_bracketed(f, inner)
            }
            other => write_bracketed(f, other),
        }
    }
}

fn write_bracketed(f: &mut Formatter<'_>, segment: &Segment) -> fmt::Result {
    f.write_char('[')?;
    write_selector(f, segment)?;
    f.write_char(']')
}

fn write_selector(f: &mut Formatter<'_>, segment: &Segment) -> fmt::Result {
    match segment {
        Segment::Index(index) => write!(f, "{index}"),
        Segment::Key(name) => write_name(f, name),
        Segment::Wildcard => f.write_char('*'),
        Segment::Slice { start, end, step } => {
            if let Some(start) = start {
                write!(f, "{start}")?;
            }
            f.write_char(':')?;
            if let Some(end) = end {
                write!(f, "{end}")?;
            }
            if let Some(step) = step {
                write!(f, ":{step}")?;
            }
            Ok(())
        }
        Segment::Filter(expr) => write!(f, "?{expr}"),
        Segment::Union(selectors) => {
            for (i, selector) in selectors.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_selector(f, selector)?;
            }
            Ok(())
        }
        Segment::Descendant(inner) => {
            f.write_str("..")?;
            write_selector(f, inner)
        }
    }
}

/// Single-quoted string literal with JSONPath escapes
fn write_name(f: &mut Formatter<'_>, name: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in name.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

/// Binding strength, loosest first
fn precedence(expr: &FilterExpr) -> u8 {
    match expr {
        FilterExpr::Or(..) => 1,
        FilterExpr::And(..) => 2,
        FilterExpr::Compare { .. } => 3,
        _ => 4,
    }
}

fn write_operand(f: &mut Formatter<'_>, expr: &FilterExpr, min_precedence: u8) -> fmt::Result {
    if precedence(expr) < min_precedence {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl Display for FilterExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::Query(query) => write!(f, "{query}"),
            FilterExpr::Literal(value) => write!(f, "{value}"),
            FilterExpr::FuncCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_char(')')
            }
            FilterExpr::Compare { op, lhs, rhs } => {
                write_operand(f, lhs, 4)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, rhs, 4)
            }
            FilterExpr::And(lhs, rhs) => {
                write_operand(f, lhs, 2)?;
                f.write_str(" && ")?;
                write_operand(f, rhs, 3)
            }
            FilterExpr::Or(lhs, rhs) => {
                write_operand(f, lhs, 1)?;
                f.write_str(" || ")?;
                write_operand(f, rhs, 2)
            }
            FilterExpr::Not(inner) => match inner.as_ref() {
                FilterExpr::Query(_) | FilterExpr::FuncCall { .. } => write!(f, "!{inner}"),
                other => write!(f, "!({other})"),
            },
        }
    }
}
