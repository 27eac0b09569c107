/// Parsing errors.
///
/// Errors recorded while turning a token stream into a [`Line`]. They are
/// collected next to the tree rather than returned early, so a line with
/// mistakes still produces a best-effort tree.
///
/// [`Line`]: crate::ast::Line
pub mod parse_error;
/// Evaluation errors.
///
/// The message payload of [`Value::Error`]. Every failure during evaluation
/// resolves to one of these, and it is displayed as a plain message.
///
/// [`Value::Error`]: crate::interpreter::value::core::Value::Error
pub mod eval_error;
/// Rate cache persistence errors.
pub mod cache_error;
/// Configuration loading and validation errors.
pub mod config_error;

pub use cache_error::{CacheError, FetchError};
pub use config_error::ConfigError;
pub use eval_error::{ErrorKind, EvalError};
pub use parse_error::ParseError;
