use crate::{
    ast::Line,
    error::ParseError,
    interpreter::{lexer::tokenize, parser::core::Parser},
};

/// The parser state and token navigation.
///
/// Declares [`core::Parser`] and the helpers every grammar rule uses to
/// look at, consume and expect tokens while recording errors.
pub mod core;

/// Line-level statements.
///
/// Assignments, continuation lines (`+ 10`, `in EUR`), comments and the
/// leftover-token check.
pub mod statement;

/// Binary operators and conversion suffixes.
///
/// Precedence climbing over `+ - * / mod ^`, and the trailing `in TARGET`
/// that wraps an entire expression.
pub mod binary;

/// Prefix operators and `PERCENT of EXPR`.
pub mod unary;

/// Literals, names, calls and groups.
///
/// Resolves `100 EUR`, `$5` and `3 square feet` into typed literals against
/// the currency, crypto, metal and unit registries.
pub mod literal;

/// Parses one line of input.
///
/// Returns the tree together with every error recorded on the way. Errors
/// never stop parsing, so the tree is always usable for redisplay.
///
/// # Example
/// ```
/// use tally::{
///     ast::{Expr, Statement},
///     interpreter::parser::parse_line,
/// };
///
/// let (line, errors) = parse_line("100 turkish lira");
/// assert!(errors.is_empty());
/// let Statement::Expression(Expr::CurrencyLit { currency, raw, .. }) = line.statement else {
///     panic!("expected a currency literal");
/// };
/// assert_eq!(currency.code, "TRY");
/// assert_eq!(raw, "100 turkish lira");
///
/// let (_, errors) = parse_line("(1 + 2");
/// assert_eq!(errors[0].to_string(), "expected ')' after expression");
/// ```
#[must_use]
pub fn parse_line(source: &str) -> (Line, Vec<ParseError>) {
    let tokens = tokenize(source);
    let mut parser = Parser::new(source, &tokens);
    let line = parser.parse_line();

    (line, parser.into_errors())
}
