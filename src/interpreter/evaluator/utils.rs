use crate::{error::EvalError, interpreter::evaluator::core::EvalResult};

/// Checks that a function received exactly `expected` arguments.
///
/// The message names the function for two-argument builtins and stays
/// generic for one-argument ones.
///
/// ## Example
/// ```
/// use tally::interpreter::{evaluator::utils::check_arity, value::core::Value};
///
/// let args = vec![Value::Number(2.0)];
///
/// assert!(check_arity("sqrt", &args, 1).is_ok());
/// assert_eq!(check_arity("pow", &args, 2).unwrap_err().to_string(),
///            "pow requires exactly two arguments");
/// ```
pub fn check_arity<T>(name: &str, args: &[T], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        return Ok(());
    }

    let message = match expected {
        1 => "function requires exactly one argument".to_string(),
        2 => format!("{name} requires exactly two arguments"),
        n => format!("{name} requires exactly {n} arguments"),
    };
    Err(EvalError::evaluation(message))
}

/// Rejects `NaN` and infinite results.
///
/// ## Example
/// ```
/// use tally::interpreter::evaluator::utils::finite;
///
/// assert_eq!(finite(2.0).unwrap(), 2.0);
/// assert_eq!(finite(f64::NAN).unwrap_err().to_string(), "invalid result");
/// ```
pub fn finite(result: f64) -> EvalResult<f64> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::evaluation("invalid result"))
    }
}
