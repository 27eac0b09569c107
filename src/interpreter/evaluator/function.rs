/// Function lookup and dispatch.
///
/// Declares the table of built-in functions with their arities.
pub mod core;
/// Single-argument math functions and `pow`.
pub mod builtin;
/// `sum`, `avg` and `count`.
pub mod aggregate;
/// `min` and `max` over any number of arguments.
pub mod min_max;
