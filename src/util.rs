/// Number parsing and formatting helpers.
///
/// Reads number literals the way the lexer produces them (thousands
/// separators, leading-dot decimals, scientific notation) and prints
/// numbers with trimmed decimals. Every displayed amount in the crate goes
/// through these functions so formatting stays consistent.
pub mod num;
