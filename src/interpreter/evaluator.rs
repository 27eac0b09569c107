/// Core evaluation logic.
///
/// Declares the [`core::Evaluator`], the per-line bookkeeping of the
/// session, and dispatch over expression variants.
pub mod core;

/// Binary operator evaluation.
///
/// Result typing for mixed operands, percentage adjustment, and conversion of
/// the right operand into the left one's currency or unit.
pub mod binary;

/// Prefix operators and `PERCENT of VALUE`.
pub mod unary;

/// `value in target` conversions.
pub mod conversion;

/// Lines that continue from the previous result.
pub mod continuation;

/// Function evaluation.
///
/// Looks up built-in functions by name, checks their arity and applies them
/// to evaluated arguments.
pub mod function;

/// Helpers shared by the built-in functions.
pub mod utils;
