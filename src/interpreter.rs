/// The token vocabulary.
///
/// Declares [`token::TokenKind`] and [`token::Token`], the unit the lexer
/// produces and the parser consumes. Every token keeps the exact source
/// slice it was read from.
pub mod token;
/// The lexer module tokenizes one line of input.
///
/// The lexer reads raw text and produces tokens for numbers, percentages,
/// names, operators, currency glyphs and comments. It merges multi-word
/// names such as `hong kong dollar` into one identifier and decides whether
/// a `-` starts a negative number.
///
/// # Responsibilities
/// - Converts the input into tokens with kind, literal and byte offset.
/// - Never fails: unknown characters become `Illegal` tokens.
pub mod lexer;
/// The parser module builds the syntax tree of one line.
///
/// The parser consumes the token stream with precedence climbing and
/// produces a [`crate::ast::Line`] together with every error it recorded.
/// Typed literals are resolved against the registries here.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Recognizes assignments, continuations and conversions.
/// - Reports positioned errors without ever aborting.
pub mod parser;
/// The value module defines the results of evaluation.
///
/// Declares the [`value::core::Value`] union and the static registries of
/// currencies, cryptocurrencies, metals and units that typed values refer
/// to.
pub mod value;
/// The session state.
///
/// Variables, the previous result, the line history and display settings,
/// shared behind one lock.
pub mod context;
/// The evaluator module computes values from syntax trees.
///
/// The evaluator walks a parsed line, applies operators with unit- and
/// currency-aware typing, converts through the rate source and records the
/// line in the session.
///
/// # Responsibilities
/// - Evaluates every expression variant.
/// - Tracks continuations, assignments and the previous result.
/// - Reports failures such as division by zero as error values.
pub mod evaluator;
