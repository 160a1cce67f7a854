//! Deliberately tiny arithmetic for generated Lua: one division or one multiplication of two
//! literal numbers. Anything else is passed through untouched.

use tweakforge_util::diagnostics::{DiagnosticSink, Warning};
use tweakforge_util::number::format_number;
use tweakforge_util::split::split_exactly_two;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Expression {
    Divide(f64, f64),
    Multiply(f64, f64),
    Unsupported,
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

fn operands(expr: &str, operator: char) -> Option<(f64, f64)> {
    let (lhs, rhs) = split_exactly_two(expr, operator)?;
    Some((lhs.trim().parse().ok()?, rhs.trim().parse().ok()?))
}

impl Expression {
    /// Classify an already whitelisted expression. Division is checked before multiplication.
    pub fn classify(expr: &str) -> Expression {
        if expr.contains('/') {
            return operands(expr, '/')
                .map(|(a, b)| Expression::Divide(a, b))
                .unwrap_or(Expression::Unsupported);
        }

        if expr.contains('*') {
            return operands(expr, '*')
                .map(|(a, b)| Expression::Multiply(a, b))
                .unwrap_or(Expression::Unsupported);
        }

        Expression::Unsupported
    }

    pub fn value(&self) -> Option<f64> {
        let ret = match *self {
            Expression::Divide(a, b) => a / b,
            Expression::Multiply(a, b) => a * b,
            Expression::Unsupported => return None,
        };

        ret.is_finite().then_some(ret)
    }
}

/// Evaluate `expr`, returning the result as a decimal string, or `expr` itself if it is unsafe or
/// not one of the two supported shapes.
pub fn evaluate<S: AsRef<str>>(expr: S, diag: &mut impl DiagnosticSink) -> String {
    let expr = expr.as_ref();
    let trimmed = expr.trim();

    if !trimmed.chars().all(is_allowed_char) {
        diag.warn(Warning::UnsafeExpression {
            expr: expr.to_string(),
        });
        return expr.to_string();
    }

    match Expression::classify(trimmed).value() {
        Some(value) => {
            let ret = format_number(value);
            tracing::trace!("evaluated {expr:?} => {ret}");
            ret
        }
        None => {
            diag.warn(Warning::UnsupportedExpression {
                expr: expr.to_string(),
            });
            expr.to_string()
        }
    }
}
