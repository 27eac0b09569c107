//! # tally
//!
//! tally is a natural-language calculator written in Rust.
//! It evaluates free-form lines that mix numbers, currencies, units,
//! cryptocurrencies, metals and percentages, converts between them, and
//! keeps a running session of variables, previous results and totals.
//!
//! ```
//! use tally::engine::Engine;
//!
//! let engine = Engine::new();
//! engine.set_rate("EUR", "USD", 1.1);
//!
//! assert_eq!(engine.eval("$10 + €5").to_string(), "$15.50");
//! assert_eq!(engine.eval("100 turkish lira").to_string(), "100.00₺");
//! assert_eq!(engine.eval("3 miles in km").to_string(), "4.83 km");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed lines.
///
/// This module declares the `Line`, `Statement` and `Expr` types that
/// represent one line of input as a tree. The tree is built by the parser
/// and walked by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for every construct.
/// - Keeps the raw source text of literals for redisplay.
pub mod ast;
/// Provides the error types of the crate.
///
/// Parse errors are collected next to the tree. Evaluation errors travel
/// inside `Value::Error`. Errors from outside the language, such as file
/// I/O and configuration, are returned as `Result`s.
///
/// # Responsibilities
/// - Defines one `thiserror` enum per failure domain.
/// - Attaches source positions to parse errors.
pub mod error;
/// Orchestrates the evaluation of a line.
///
/// This module ties together tokens, lexing, parsing, values, the session
/// context and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Provides entry points for parsing and evaluating one line.
pub mod interpreter;
/// Exchange rates.
///
/// The thread-safe rate cache with path search, the offline fallback
/// rates, JSON persistence, and the traits the evaluator and rate providers
/// plug into.
pub mod rates;
/// Engine configuration loaded from defaults, a TOML file and the
/// environment.
pub mod config;
/// The public façade: one session, evaluated line by line.
pub mod engine;
/// General utilities shared across modules.
///
/// # Responsibilities
/// - Parse number literals and format amounts consistently.
pub mod util;

pub use engine::Engine;
pub use interpreter::value::core::Value;
